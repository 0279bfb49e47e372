//! The handler capability every filter consumes and exposes.

use std::fmt;
use std::sync::Arc;

use crate::extension::ExtensionFilter;
use crate::query_filter::QueryFilter;
use crate::request::Request;
use crate::response::Response;

/// Something that answers a request by writing to a response.
///
/// Every filter in this crate wraps one `Handler` and is a `Handler` itself,
/// so filters nest to any depth.
///
/// # Examples
///
/// ```
/// use handler_filters::{Handler, Request, Response};
/// use http::Method;
///
/// struct Hello;
///
/// impl Handler for Hello {
///     fn handle(&self, _req: &mut Request, res: &mut Response) {
///         res.write(b"hello");
///     }
/// }
///
/// let mut req = Request::new(Method::GET, "/");
/// let mut res = Response::new();
/// Hello.handle(&mut req, &mut res);
/// assert_eq!(res.body_str(), Some("hello"));
/// ```
pub trait Handler {
    /// Handles one request.
    fn handle(&self, req: &mut Request, res: &mut Response);
}

impl<H: Handler + ?Sized> Handler for &H {
    fn handle(&self, req: &mut Request, res: &mut Response) {
        (**self).handle(req, res)
    }
}

impl<H: Handler + ?Sized> Handler for Box<H> {
    fn handle(&self, req: &mut Request, res: &mut Response) {
        (**self).handle(req, res)
    }
}

impl<H: Handler + ?Sized> Handler for Arc<H> {
    fn handle(&self, req: &mut Request, res: &mut Response) {
        (**self).handle(req, res)
    }
}

/// A [`Handler`] backed by a closure. Created by [`handler_fn`].
#[derive(Clone, Copy)]
pub struct HandlerFn<F> {
    f: F,
}

impl<F> fmt::Debug for HandlerFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerFn").finish_non_exhaustive()
    }
}

impl<F> Handler for HandlerFn<F>
where
    F: Fn(&mut Request, &mut Response),
{
    fn handle(&self, req: &mut Request, res: &mut Response) {
        (self.f)(req, res)
    }
}

/// Wraps a closure as a [`Handler`].
///
/// ```
/// use handler_filters::{handler_fn, Handler, Request, Response};
/// use http::Method;
///
/// let echo = handler_fn(|req: &mut Request, res: &mut Response| {
///     res.write(req.path().as_bytes());
/// });
///
/// let mut res = Response::new();
/// echo.handle(&mut Request::new(Method::GET, "/ping"), &mut res);
/// assert_eq!(res.body_str(), Some("/ping"));
/// ```
pub fn handler_fn<F>(f: F) -> HandlerFn<F>
where
    F: Fn(&mut Request, &mut Response),
{
    HandlerFn { f }
}

/// Builder-style composition for any [`Handler`].
///
/// Each call wraps `self`, so the filter added last runs first.
///
/// ```
/// use handler_filters::{handler_fn, Handler, HandlerExt, Request, Response};
/// use http::Method;
///
/// let app = handler_fn(|req: &mut Request, res: &mut Response| {
///     res.write(req.uri().as_bytes());
/// })
/// .strip_query()
/// .with_extension();
///
/// let mut res = Response::new();
/// app.handle(&mut Request::new(Method::POST, "/report.CSV?x=1"), &mut res);
/// assert_eq!(res.body_str(), Some("/report"));
/// ```
pub trait HandlerExt: Handler + Sized {
    /// Wraps `self` in an [`ExtensionFilter`].
    fn with_extension(self) -> ExtensionFilter<Self> {
        ExtensionFilter::new(self)
    }

    /// Wraps `self` in a [`QueryFilter`].
    fn strip_query(self) -> QueryFilter<Self> {
        QueryFilter::new(self)
    }

    /// Erases the concrete type.
    fn boxed(self) -> Box<dyn Handler + Send + Sync>
    where
        Self: Send + Sync + 'static,
    {
        Box::new(self)
    }
}

impl<H: Handler> HandlerExt for H {}
