use http::Method;

use crate::extension::EXTENSION_PARAM;
use crate::query::QueryParams;

/// A request as seen by a filter chain.
///
/// Holds the method, the path, and the raw (still encoded) query string.
/// A single `&mut Request` is threaded through the chain, so rewrites made
/// by an outer filter are visible to every handler below it.
///
/// # Examples
///
/// ```
/// use handler_filters::Request;
/// use http::Method;
///
/// let req = Request::new(Method::GET, "/reports/q3.csv?year=2024");
/// assert_eq!(req.path(), "/reports/q3.csv");
/// assert_eq!(req.raw_query(), "year=2024");
/// assert_eq!(req.query().get("year"), Some("2024"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    method: Method,
    path: String,
    raw_query: String,
}

impl Request {
    /// Creates a request from a method and a request target (`path?query`).
    ///
    /// The target is split at the first `?`.
    pub fn new(method: Method, target: &str) -> Self {
        let (path, raw_query) = target.split_once('?').unwrap_or((target, ""));
        Self::from_parts(method, path, raw_query)
    }

    /// Creates a request from its individual parts.
    pub fn from_parts(
        method: Method,
        path: impl Into<String>,
        raw_query: impl Into<String>,
    ) -> Self {
        Self {
            method,
            path: path.into(),
            raw_query: raw_query.into(),
        }
    }

    /// Returns the request method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the request path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the raw query string, without the leading `?`.
    pub fn raw_query(&self) -> &str {
        &self.raw_query
    }

    /// Decodes the raw query string.
    pub fn query(&self) -> QueryParams {
        QueryParams::parse(&self.raw_query)
    }

    /// Returns the extension moved into the query by an
    /// [`ExtensionFilter`](crate::ExtensionFilter), if any.
    pub fn extension(&self) -> Option<String> {
        self.query().get(EXTENSION_PARAM).map(str::to_owned)
    }

    /// Renders the request target as `path` or `path?query`.
    pub fn uri(&self) -> String {
        if self.raw_query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.raw_query)
        }
    }

    /// Replaces the method.
    pub fn set_method(&mut self, method: Method) {
        self.method = method;
    }

    /// Replaces the path.
    pub fn set_path(&mut self, path: impl Into<String>) {
        self.path = path.into();
    }

    /// Replaces the raw query string.
    pub fn set_raw_query(&mut self, raw_query: impl Into<String>) {
        self.raw_query = raw_query.into();
    }
}

/// Builds a request from an [`http::Request`].
///
/// The path is percent-decoded (so `/report%2EJSON` becomes `/report.JSON`);
/// decoded bytes that are not valid UTF-8 are replaced with U+FFFD and
/// malformed escapes are kept as-is. The query stays raw.
impl<B> From<&http::Request<B>> for Request {
    fn from(req: &http::Request<B>) -> Self {
        let uri = req.uri();
        Self::from_parts(
            req.method().clone(),
            decode_path(uri.path()),
            uri.query().unwrap_or_default(),
        )
    }
}

fn decode_path(raw: &str) -> String {
    let bytes = urlencoding::decode_binary(raw.as_bytes());
    String::from_utf8_lossy(&bytes).into_owned()
}
