//! Request and outcome log lines emitted by the executor.

use tracing::{debug, warn};

use crate::error::NetError;
use crate::http::HttpRequest;
use crate::response::TransportResult;

const BODY_PREVIEW_LIMIT: usize = 512;

pub(crate) fn request(request: &HttpRequest) {
    let header_names: Vec<&str> = request.headers.iter().map(|(name, _)| name.as_str()).collect();
    debug!(
        method = %request.method,
        url = %request.url,
        headers = ?header_names,
        body = %body_preview(request.body.as_deref()),
        "sending request"
    );
}

pub(crate) fn response(result: &TransportResult) {
    match result {
        Ok(response) => debug!(
            status = ?response.status,
            body = %body_preview(response.body.as_deref()),
            "received response"
        ),
        Err(err) => debug!(
            status = ?err.status,
            message = %err.message,
            "transport error"
        ),
    }
}

pub(crate) fn decoded(has_value: bool) {
    if has_value {
        debug!("request succeeded");
    } else {
        debug!("request succeeded without a decodable value");
    }
}

pub(crate) fn completed() {
    debug!("request completed");
}

pub(crate) fn failed(err: &NetError) {
    warn!(code = err.code, message = %err.message, "request failed");
}

fn body_preview(body: Option<&[u8]>) -> String {
    let Some(body) = body else {
        return "<no body>".to_string();
    };
    let text = String::from_utf8_lossy(body);
    match text.char_indices().nth(BODY_PREVIEW_LIMIT) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use crate::http::TransportResponse;

    #[test]
    fn preview_marks_missing_body() {
        assert_eq!(body_preview(None), "<no body>");
    }

    #[test]
    fn preview_truncates_long_bodies() {
        let body = "x".repeat(BODY_PREVIEW_LIMIT + 10);
        let preview = body_preview(Some(body.as_bytes()));
        assert_eq!(preview.len(), BODY_PREVIEW_LIMIT + 3);
        assert!(preview.ends_with("..."));
    }

    #[test]
    fn preview_shows_response_bytes() {
        let response = TransportResponse::new(200, "not json");
        assert_eq!(body_preview(response.body.as_deref()), "not json");
        assert_eq!(
            body_preview(TransportResponse::status_only(204).body.as_deref()),
            "<no body>"
        );
    }

    #[test]
    fn response_logs_both_result_shapes() {
        response(&Ok(TransportResponse::new(200, "[1]")));
        response(&Ok(TransportResponse::default()));
        response(&Err(TransportError::with_status(503, "unavailable")));
    }

    #[test]
    fn preview_keeps_short_bodies() {
        assert_eq!(body_preview(Some(br#"{"a":1}"#)), r#"{"a":1}"#);
    }
}
