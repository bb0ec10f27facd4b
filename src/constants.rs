pub const OK_RESPONSE: &str = "HTTP/1.1 200 OK";
pub const BAD_REQUEST: &str = "HTTP/1.1 400 Bad Request";
pub const UNAUTHORIZED: &str = "HTTP/1.1 401 Unauthorized";
pub const NOT_FOUND: &str = "HTTP/1.1 404 Not Found";
pub const METHOD_NOT_ALLOWED: &str = "HTTP/1.1 405 Method Not Allowed";
pub const INTERNAL_ERROR: &str = "HTTP/1.1 500 Internal Server Error";

pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_ERROR: &str = "error";

pub const IDENTITY_TIMEOUT_SECS: u64 = 3;

pub const MAX_HEAD_BYTES: usize = 8 * 1024;
pub const MAX_BODY_BYTES: usize = 64 * 1024;
