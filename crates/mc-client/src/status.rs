//! Fixed status-code to reason-phrase table used in error reports.

/// Reason phrase reported when a status has no entry in the table.
pub const UNKNOWN_STATUS_TEXT: &str = "unknown";

/// Resolve a human status text for an HTTP or envelope status code.
pub fn status_text(status: Option<u16>) -> &'static str {
    let Some(status) = status else {
        return UNKNOWN_STATUS_TEXT;
    };

    match status {
        200 => "OK",
        204 => "No Content",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        408 => "Request Timeout",
        409 => "Conflict",
        413 => "Payload Too Large",
        415 => "Unsupported Media Type",
        418 => "I'm a teapot",
        422 => "Unprocessable Entity",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        501 => "Not Implemented",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        504 => "Gateway Timeout",
        _ => UNKNOWN_STATUS_TEXT,
    }
}
