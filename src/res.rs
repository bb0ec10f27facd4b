use serde::Serialize;
use tracing::error;

use crate::{
    constants::{INTERNAL_ERROR, STATUS_ERROR},
    utils::ser_to_str,
};

#[derive(Debug)]
pub struct Response {
    pub status_line: &'static str,
    pub body: String,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    status: &'static str,
    message: &'a str,
}

impl Response {
    pub fn json<T: Serialize>(status_line: &'static str, body: &T) -> Self {
        match ser_to_str(body) {
            Ok(body) => Response { status_line, body },
            Err(e) => {
                error!("serde error: {}", e);
                Response::error(INTERNAL_ERROR, "Internal server error")
            }
        }
    }

    pub fn error(status_line: &'static str, message: &str) -> Self {
        let body = ErrorBody {
            status: STATUS_ERROR,
            message,
        };
        let body = ser_to_str(&body).unwrap_or_default();
        Response { status_line, body }
    }

    pub fn status_code(&self) -> u16 {
        self.status_line
            .split_whitespace()
            .nth(1)
            .and_then(|code| code.parse().ok())
            .unwrap_or(500)
    }

    pub fn to_http(&self) -> String {
        format!(
            "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            self.status_line,
            self.body.len(),
            self.body
        )
    }
}
