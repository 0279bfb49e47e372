//! Drops the query string on anything but `GET`.

use http::Method;

use crate::handler::Handler;
use crate::request::Request;
use crate::response::Response;

/// Filter that clears the raw query string on every request whose method is
/// not exactly `GET`.
///
/// Form decoding that merges query and body parameters would otherwise let a
/// crafted URL inject or override fields of a `POST`. `HEAD`, `OPTIONS` and
/// extension methods such as a lower-case `get` are stripped too.
///
/// # Examples
///
/// ```
/// use handler_filters::{handler_fn, Handler, QueryFilter, Request, Response};
/// use http::Method;
///
/// let filter = QueryFilter::new(handler_fn(|req: &mut Request, res: &mut Response| {
///     res.write(req.raw_query().as_bytes());
/// }));
///
/// let mut res = Response::new();
/// filter.handle(&mut Request::new(Method::POST, "/login?admin=1"), &mut res);
/// assert_eq!(res.body_str(), Some(""));
///
/// let mut res = Response::new();
/// filter.handle(&mut Request::new(Method::GET, "/search?q=rust"), &mut res);
/// assert_eq!(res.body_str(), Some("q=rust"));
/// ```
#[derive(Debug, Clone)]
pub struct QueryFilter<H> {
    inner: H,
}

impl<H> QueryFilter<H> {
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

impl<H: Handler> Handler for QueryFilter<H> {
    fn handle(&self, req: &mut Request, res: &mut Response) {
        if req.method() != Method::GET {
            if !req.raw_query().is_empty() {
                tracing::debug!(method = %req.method(), path = %req.path(), "dropped query string");
            }
            req.set_raw_query(String::new());
        }
        self.inner.handle(req, res)
    }
}
