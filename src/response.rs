use http::header::{HeaderMap, HeaderName, HeaderValue};
use http::StatusCode;

/// The output side of a request.
///
/// The status line is write-once: the first status set (explicitly, or
/// implicitly by writing body bytes) is the one that is sent. Headers can
/// only change before that point. Body bytes accumulate in write order.
///
/// # Examples
///
/// ```
/// use handler_filters::Response;
/// use http::StatusCode;
///
/// let mut res = Response::new();
/// res.set_status(StatusCode::CREATED);
/// res.write(b"ok");
///
/// assert_eq!(res.status(), StatusCode::CREATED);
/// assert_eq!(res.body_str(), Some("ok"));
/// ```
#[derive(Debug, Default)]
pub struct Response {
    status: Option<StatusCode>,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl Response {
    /// Creates an empty response with no committed status.
    pub fn new() -> Self {
        Self::default()
    }

    /// Commits the status code.
    ///
    /// Only the first call has an effect; later calls are logged and ignored.
    pub fn set_status(&mut self, status: StatusCode) {
        match self.status {
            None => self.status = Some(status),
            Some(committed) => {
                tracing::warn!(
                    committed = %committed,
                    ignored = %status,
                    "superfluous status write"
                );
            }
        }
    }

    /// Appends bytes to the body, committing `200 OK` if no status was set.
    pub fn write(&mut self, bytes: &[u8]) {
        if self.status.is_none() {
            self.status = Some(StatusCode::OK);
        }
        self.body.extend_from_slice(bytes);
    }

    /// Sets a header, replacing any previous values.
    ///
    /// Headers are sent with the status line, so once a status is committed
    /// further header writes are logged and ignored.
    pub fn insert_header(&mut self, name: HeaderName, value: HeaderValue) {
        if let Some(committed) = self.status {
            tracing::warn!(
                committed = %committed,
                header = %name,
                "header write after status was committed"
            );
            return;
        }
        self.headers.insert(name, value);
    }

    /// Returns `true` once a status has been committed.
    pub fn is_committed(&self) -> bool {
        self.status.is_some()
    }

    /// Returns the committed status, or `200 OK` if none was committed.
    pub fn status(&self) -> StatusCode {
        self.status.unwrap_or(StatusCode::OK)
    }

    /// Returns the response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns the body bytes written so far.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Returns the body as UTF-8, if it is valid UTF-8.
    pub fn body_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }

    /// Converts into an [`http::Response`] for handing to a server.
    pub fn into_http(self) -> http::Response<Vec<u8>> {
        let mut res = http::Response::new(self.body);
        *res.status_mut() = self.status.unwrap_or(StatusCode::OK);
        *res.headers_mut() = self.headers;
        res
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::header::CONTENT_TYPE;

    #[test]
    fn new_response_is_uncommitted_ok() {
        let res = Response::new();
        assert!(!res.is_committed());
        assert_eq!(res.status(), StatusCode::OK);
        assert!(res.body().is_empty());
    }

    #[test]
    fn first_status_wins() {
        let mut res = Response::new();
        res.set_status(StatusCode::NOT_FOUND);
        res.set_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn write_commits_ok() {
        let mut res = Response::new();
        res.write(b"hello");
        res.set_status(StatusCode::INTERNAL_SERVER_ERROR);

        assert!(res.is_committed());
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.body(), b"hello");
    }

    #[test]
    fn writes_accumulate() {
        let mut res = Response::new();
        res.write(b"disk ");
        res.write(b"full");
        assert_eq!(res.body_str(), Some("disk full"));
    }

    #[test]
    fn body_str_rejects_invalid_utf8() {
        let mut res = Response::new();
        res.write(&[0xff, 0xfe]);
        assert_eq!(res.body_str(), None);
    }

    #[test]
    fn headers_are_frozen_once_committed() {
        let mut res = Response::new();
        res.insert_header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        res.write(b"{}");
        res.insert_header(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        res.insert_header(
            http::header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        );

        assert_eq!(res.headers()[CONTENT_TYPE], "application/json");
        assert_eq!(res.headers().len(), 1);
    }

    #[test]
    fn into_http_carries_all_fields() {
        let mut res = Response::new();
        res.insert_header(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        res.set_status(StatusCode::ACCEPTED);
        res.write(b"queued");

        let http_res = res.into_http();
        assert_eq!(http_res.status(), StatusCode::ACCEPTED);
        assert_eq!(http_res.headers()[CONTENT_TYPE], "text/plain");
        assert_eq!(http_res.body(), b"queued");
    }
}
