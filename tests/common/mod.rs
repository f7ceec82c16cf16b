// In-memory transport that replays canned responses and records requests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;

use url::Url;
use uwquest::error::TransportError;
use uwquest::{Response, Transport};

pub const HIDDEN_PAGE: &str = include_str!("../fixtures/grades_page.html");
pub const GRADES_RESULT: &str = include_str!("../fixtures/grades_result.html");
pub const SCHEDULE_PAGE: &str = include_str!("../fixtures/schedule_page.html");
pub const SCHEDULE_RESULT: &str = include_str!("../fixtures/schedule_result.html");

#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: &'static str,
    pub url: String,
    pub content_type: Option<String>,
    pub body: Option<String>,
}

#[derive(Default)]
pub struct ScriptedTransport {
    responses: RefCell<VecDeque<Response>>,
    requests: RefCell<Vec<Request>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    // Queues the next response; `url` is the final URL after redirects.
    pub fn respond(self, status: u16, url: &str, body: &str) -> Self {
        self.responses.borrow_mut().push_back(Response {
            status,
            body: body.to_string(),
            url: Url::parse(url).unwrap(),
        });
        self
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.borrow().clone()
    }

    fn next(&self, request: Request) -> Result<Response, TransportError> {
        let url = request.url.clone();
        self.requests.borrow_mut().push(request);
        self.responses
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| format!("no response scripted for {url}").into())
    }
}

impl Transport for ScriptedTransport {
    fn get(&self, url: &str) -> Result<Response, TransportError> {
        self.next(Request {
            method: "GET",
            url: url.to_string(),
            content_type: None,
            body: None,
        })
    }

    fn post(&self, url: &str, content_type: &str, body: String) -> Result<Response, TransportError> {
        self.next(Request {
            method: "POST",
            url: url.to_string(),
            content_type: Some(content_type.to_string()),
            body: Some(body),
        })
    }
}
