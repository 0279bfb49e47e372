//! Moves a trailing file extension from the path into the query string.

use crate::handler::Handler;
use crate::query::encode_component;
use crate::request::Request;
use crate::response::Response;

/// Query parameter that carries the extracted extension.
pub const EXTENSION_PARAM: &str = ":extension";

/// Result of a successful extension extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    /// Path with the extension removed
    pub path: String,
    /// Raw query with the extension parameter prepended
    pub raw_query: String,
    /// Lower-cased extension, including the leading `.`
    pub extension: String,
}

/// Splits the extension off the final segment of `path`.
///
/// Returns `None` (leave the request alone) when the final segment has no
/// `.` or only a leading one, as in `/.hidden` or `/a.b/c`. The last `.`
/// wins, and one trailing `/` is kept.
///
/// The new raw query is always `:extension=<ext>&` followed by the old raw
/// query, even when the old one was empty. Consumers that split on `&`
/// already ignore the empty trailing pair.
///
/// # Examples
///
/// ```
/// use handler_filters::extract_extension;
///
/// let out = extract_extension("/foo/bar.JSON/", "page=2").unwrap();
/// assert_eq!(out.path, "/foo/bar/");
/// assert_eq!(out.raw_query, ":extension=.json&page=2");
/// assert_eq!(out.extension, ".json");
///
/// assert!(extract_extension("/a.b/c", "").is_none());
/// assert!(extract_extension("/.hidden", "").is_none());
/// ```
pub fn extract_extension(path: &str, raw_query: &str) -> Option<Extracted> {
    let trimmed = path.trim_end_matches('/');
    let trailing_slash = trimmed.len() < path.len();

    let segment_start = trimmed.rfind('/').map_or(0, |slash| slash + 1);
    let dot = segment_start + trimmed[segment_start..].rfind('.')?;
    if dot == segment_start {
        return None;
    }

    let extension = trimmed[dot..].to_lowercase();
    let raw_query = format!(
        "{}={}&{}",
        EXTENSION_PARAM,
        encode_component(&extension),
        raw_query
    );

    let mut path = trimmed[..dot].to_string();
    if trailing_slash {
        path.push('/');
    }

    Some(Extracted {
        path,
        raw_query,
        extension,
    })
}

/// Filter that moves a path's file extension into the `:extension` query
/// parameter before calling the inner handler.
///
/// `GET /foo/bar.JSON?page=2` reaches the inner handler as
/// `GET /foo/bar?:extension=.json&page=2`.
///
/// # Examples
///
/// ```
/// use handler_filters::{handler_fn, ExtensionFilter, Handler, Request, Response};
/// use http::Method;
///
/// let filter = ExtensionFilter::new(handler_fn(|req: &mut Request, res: &mut Response| {
///     let ext = req.extension().unwrap_or_default();
///     res.write(format!("{} as {}", req.path(), ext).as_bytes());
/// }));
///
/// let mut res = Response::new();
/// filter.handle(&mut Request::new(Method::GET, "/users/7.XML"), &mut res);
/// assert_eq!(res.body_str(), Some("/users/7 as .xml"));
/// ```
#[derive(Debug, Clone)]
pub struct ExtensionFilter<H> {
    inner: H,
}

impl<H> ExtensionFilter<H> {
    /// Wraps `inner`.
    pub fn new(inner: H) -> Self {
        Self { inner }
    }

    /// Returns the wrapped handler.
    pub fn inner(&self) -> &H {
        &self.inner
    }

    /// Unwraps the filter.
    pub fn into_inner(self) -> H {
        self.inner
    }
}

impl<H: Handler> Handler for ExtensionFilter<H> {
    fn handle(&self, req: &mut Request, res: &mut Response) {
        if let Some(extracted) = extract_extension(req.path(), req.raw_query()) {
            tracing::debug!(
                extension = %extracted.extension,
                path = %extracted.path,
                "moved path extension into query"
            );
            req.set_path(extracted.path);
            req.set_raw_query(extracted.raw_query);
        }
        self.inner.handle(req, res)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::handler_fn;
    use http::Method;

    fn filtered(target: &str) -> Request {
        let filter = ExtensionFilter::new(handler_fn(|_: &mut Request, _: &mut Response| {}));
        let mut req = Request::new(Method::GET, target);
        filter.handle(&mut req, &mut Response::new());
        req
    }

    #[test]
    fn no_dot_is_unchanged() {
        assert_eq!(extract_extension("/foo/bar", "a=1"), None);
        assert_eq!(extract_extension("/", ""), None);
        assert_eq!(extract_extension("", ""), None);
    }

    #[test]
    fn extension_is_lower_cased_and_prepended() {
        let out = extract_extension("/foo/bar.JSON", "").expect("extension");
        assert_eq!(out.path, "/foo/bar");
        assert_eq!(out.raw_query, ":extension=.json&");
        assert_eq!(out.extension, ".json");
    }

    #[test]
    fn existing_query_follows_extension() {
        let out = extract_extension("/foo/bar.json", "x=1&y=2").expect("extension");
        assert_eq!(out.raw_query, ":extension=.json&x=1&y=2");
    }

    #[test]
    fn trailing_slash_is_preserved() {
        let out = extract_extension("/foo/bar.JSON/", "").expect("extension");
        assert_eq!(out.path, "/foo/bar/");
        assert_eq!(out.raw_query, ":extension=.json&");
    }

    #[test]
    fn repeated_trailing_slashes_collapse_to_one() {
        let out = extract_extension("/foo/bar.json//", "").expect("extension");
        assert_eq!(out.path, "/foo/bar/");
    }

    #[test]
    fn leading_dot_is_not_an_extension() {
        assert_eq!(extract_extension(".hidden", ""), None);
        assert_eq!(extract_extension("/.hidden", ""), None);
        assert_eq!(extract_extension("/dir/.profile/", ""), None);
    }

    #[test]
    fn dot_in_earlier_segment_is_ignored() {
        assert_eq!(extract_extension("/a.b/c", ""), None);
        assert_eq!(extract_extension("/v1.2/users/", ""), None);
    }

    #[test]
    fn last_dot_wins() {
        let out = extract_extension("/archive.tar.gz", "").expect("extension");
        assert_eq!(out.path, "/archive.tar");
        assert_eq!(out.extension, ".gz");

        let bare = extract_extension("file.tar.gz", "").expect("extension");
        assert_eq!(bare.path, "file.tar");
    }

    #[test]
    fn extension_value_is_form_encoded() {
        let out = extract_extension("/f.A B", "").expect("extension");
        assert_eq!(out.raw_query, ":extension=.a+b&");
    }

    #[test]
    fn transform_is_idempotent() {
        let once = extract_extension("/foo/bar.JSON/", "q=1").expect("extension");
        assert_eq!(extract_extension(&once.path, &once.raw_query), None);
    }

    #[test]
    fn filter_rewrites_before_delegating() {
        let req = filtered("/foo/bar.JSON?page=2");
        assert_eq!(req.path(), "/foo/bar");
        assert_eq!(req.raw_query(), ":extension=.json&page=2");
        assert_eq!(req.extension(), Some(".json".to_string()));
        assert_eq!(req.query().get("page"), Some("2"));
    }

    #[test]
    fn filter_leaves_plain_paths_alone() {
        let req = filtered("/foo/bar?page=2");
        assert_eq!(req.path(), "/foo/bar");
        assert_eq!(req.raw_query(), "page=2");
    }

    #[test]
    fn filter_always_delegates() {
        use std::cell::Cell;

        let calls = Cell::new(0);
        let filter = ExtensionFilter::new(handler_fn(|_: &mut Request, _: &mut Response| {
            calls.set(calls.get() + 1);
        }));

        for target in ["/a.json", "/a", "/.hidden"] {
            filter.handle(&mut Request::new(Method::GET, target), &mut Response::new());
        }
        assert_eq!(calls.get(), 3);
    }
}
