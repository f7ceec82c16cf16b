use log::debug;
use scraper::Html;

use crate::consts::FORM_CONTENT_TYPE;
use crate::error::{Error, Result};
use crate::form::Form;
use crate::transport::{HttpSession, Response, Transport};

// Authentication lives entirely in the transport's cookie store.
pub struct Client<T = HttpSession> {
    transport: T,
    authenticated: bool,
}

impl Client {
    // Creates a client over a fresh cookie-persisting HTTP session.
    pub fn new() -> Result<Self> {
        Ok(Self::with_transport(HttpSession::new()?))
    }
}

impl<T: Transport> Client<T> {
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport,
            authenticated: false,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub(crate) fn mark_authenticated(&mut self) {
        self.authenticated = true;
    }

    // GETs `url` and requires a 200 response.
    pub(crate) fn get(&self, url: &str, step: &'static str) -> Result<Response> {
        self.transport
            .get(url)
            .map_err(|cause| Error::Transport { step, cause })?
            .expect_ok(step)
    }

    // POSTs `form` URL-encoded to `url` and requires a 200 response.
    pub(crate) fn post_form(&self, url: &str, form: &Form, step: &'static str) -> Result<Response> {
        debug!("submitting {} form fields while {step}", form.len());
        self.transport
            .post(url, FORM_CONTENT_TYPE, form.encode())
            .map_err(|cause| Error::Transport { step, cause })?
            .expect_ok(step)
    }

    pub(crate) fn get_document(&self, url: &str, step: &'static str) -> Result<Html> {
        let res = self.get(url, step)?;
        Ok(Html::parse_document(&res.body))
    }
}
