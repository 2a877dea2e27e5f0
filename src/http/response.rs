use std::collections::HashMap;

use crate::http::mime;

/// HTTP status codes the server emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 400 Bad Request
    BadRequest,
    /// 404 Not Found
    NotFound,
    /// 405 Method Not Allowed
    MethodNotAllowed,
    /// 500 Internal Server Error
    InternalServerError,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::BadRequest => 400,
            StatusCode::NotFound => 404,
            StatusCode::MethodNotAllowed => 405,
            StatusCode::InternalServerError => 500,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
            StatusCode::MethodNotAllowed => "Method Not Allowed",
            StatusCode::InternalServerError => "Internal Server Error",
        }
    }
}

/// A complete, buffered HTTP response.
///
/// Streamed file bodies bypass this type; see `files::stream`.
#[derive(Debug)]
pub struct Response {
    pub status: StatusCode,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

/// Builder for constructing HTTP responses in a fluent style.
pub struct ResponseBuilder {
    status: StatusCode,
    headers: HashMap<String, String>,
    body: Vec<u8>,
}

impl ResponseBuilder {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    /// Builds the final Response.
    ///
    /// Adds a Content-Length header based on body size if not already present.
    pub fn build(mut self) -> Response {
        self.headers
            .entry("Content-Length".to_string())
            .or_insert_with(|| self.body.len().to_string());

        Response {
            status: self.status,
            headers: self.headers,
            body: self.body,
        }
    }
}

impl Response {
    /// Creates a 200 OK response carrying an HTML body.
    pub fn html(body: String) -> Self {
        ResponseBuilder::new(StatusCode::Ok)
            .header("Content-Type", mime::TEXT_HTML)
            .body(body.into_bytes())
            .build()
    }

    /// Creates a 200 OK response carrying the embedded stylesheet.
    pub fn css(body: &str) -> Self {
        ResponseBuilder::new(StatusCode::Ok)
            .header("Content-Type", mime::TEXT_CSS)
            .body(body.as_bytes().to_vec())
            .build()
    }

    /// Creates a 400 Bad Request response.
    pub fn bad_request() -> Self {
        Self::plain_text(StatusCode::BadRequest, "Bad Request")
    }

    /// Creates a 404 Not Found response.
    ///
    /// Both genuinely absent paths and rejected escape attempts produce
    /// this response; clients cannot tell the two apart.
    pub fn not_found() -> Self {
        Self::plain_text(StatusCode::NotFound, "Not Found")
    }

    /// Creates a 405 Method Not Allowed response.
    pub fn method_not_allowed() -> Self {
        Self::plain_text(StatusCode::MethodNotAllowed, "Method Not Allowed")
    }

    /// Creates a 500 response whose body carries the error text.
    pub fn internal_error(err: &str) -> Self {
        Self::plain_text(StatusCode::InternalServerError, err)
    }

    fn plain_text(status: StatusCode, body: &str) -> Self {
        ResponseBuilder::new(status)
            .header("Content-Type", mime::TEXT_PLAIN)
            .body(body.as_bytes().to_vec())
            .build()
    }
}
