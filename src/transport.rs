use log::debug;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use url::Url;

use crate::error::{Error, Result, TransportError};

// A fully read HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub body: String,
    pub url: Url,
}

impl Response {
    // Fails with Error::UnexpectedStatus unless the status is 200.
    pub fn expect_ok(self, step: &'static str) -> Result<Self> {
        if self.status != 200 {
            return Err(Error::UnexpectedStatus {
                step,
                status: self.status,
            });
        }
        Ok(self)
    }
}

pub trait Transport {
    fn get(&self, url: &str) -> Result<Response, TransportError>;
    fn post(&self, url: &str, content_type: &str, body: String)
        -> Result<Response, TransportError>;
}

// Cookie-persisting HTTP session backed by `reqwest`.
pub struct HttpSession {
    client: Client,
}

impl HttpSession {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|e| Error::Transport {
                step: "building HTTP client",
                cause: e.into(),
            })?;
        Ok(Self { client })
    }
}

impl Transport for HttpSession {
    fn get(&self, url: &str) -> Result<Response, TransportError> {
        debug!("GET {url}");
        read_response(self.client.get(url).send()?)
    }

    fn post(
        &self,
        url: &str,
        content_type: &str,
        body: String,
    ) -> Result<Response, TransportError> {
        debug!("POST {url} ({} bytes)", body.len());
        let res = self
            .client
            .post(url)
            .header(CONTENT_TYPE, content_type)
            .body(body)
            .send()?;
        read_response(res)
    }
}

// Reading the body to the end hands the connection back to the pool.
fn read_response(res: reqwest::blocking::Response) -> Result<Response, TransportError> {
    let status = res.status().as_u16();
    let url = res.url().clone();
    let body = res.text()?;
    debug!("{status} from {url} ({} bytes)", body.len());
    Ok(Response { status, body, url })
}
