//! Classify HTTP status and curl errors into retry policy error kinds.

use super::error::FetchError;
use super::policy::ErrorKind;

/// Statuses that are retried with backoff. Everything else outside 2xx fails at once.
pub const RETRY_STATUSES: [u32; 5] = [429, 500, 502, 503, 504];

/// Classify an HTTP status code for retry decisions.
pub fn classify_http_status(code: u32) -> ErrorKind {
    match code {
        429 | 503 => ErrorKind::Throttled,
        500 | 502 | 504 => ErrorKind::Http5xx(code as u16),
        _ => ErrorKind::Other,
    }
}

/// Classify a curl error for retry decisions.
pub fn classify_curl_error(e: &curl::Error) -> ErrorKind {
    if e.is_operation_timedout() {
        return ErrorKind::Timeout;
    }
    if e.is_couldnt_connect()
        || e.is_couldnt_resolve_host()
        || e.is_couldnt_resolve_proxy()
        || e.is_read_error()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
    {
        return ErrorKind::Connection;
    }
    ErrorKind::Other
}

/// Classify a fetch error (curl or HTTP) into an ErrorKind.
pub fn classify(e: &FetchError) -> ErrorKind {
    match e {
        FetchError::Curl(ce) => classify_curl_error(ce),
        FetchError::Http(code) => classify_http_status(*code),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_429_and_503_throttled() {
        assert_eq!(classify_http_status(429), ErrorKind::Throttled);
        assert_eq!(classify_http_status(503), ErrorKind::Throttled);
    }

    #[test]
    fn http_500_502_504_retryable() {
        assert!(matches!(classify_http_status(500), ErrorKind::Http5xx(500)));
        assert!(matches!(classify_http_status(502), ErrorKind::Http5xx(502)));
        assert!(matches!(classify_http_status(504), ErrorKind::Http5xx(504)));
    }

    #[test]
    fn other_statuses_not_retried() {
        assert_eq!(classify_http_status(404), ErrorKind::Other);
        assert_eq!(classify_http_status(403), ErrorKind::Other);
        assert_eq!(classify_http_status(501), ErrorKind::Other);
        assert_eq!(classify_http_status(505), ErrorKind::Other);
    }

    #[test]
    fn retry_set_matches_classification() {
        for code in RETRY_STATUSES {
            assert_ne!(classify_http_status(code), ErrorKind::Other, "{code}");
        }
    }

    #[test]
    fn classify_wraps_http() {
        assert_eq!(classify(&FetchError::Http(503)), ErrorKind::Throttled);
        assert_eq!(classify(&FetchError::Http(410)), ErrorKind::Other);
    }
}
