//! Adapts fallible handler functions into [`Handler`]s.

use std::fmt;

use http::header::{HeaderValue, CONTENT_TYPE, X_CONTENT_TYPE_OPTIONS};
use http::StatusCode;

use crate::handler::Handler;
use crate::request::Request;
use crate::response::Response;

/// A [`Handler`] built from a function that may fail.
///
/// The function is called once per request. If it returns `Err(e)`, the
/// response gets status `500 Internal Server Error` and `e.to_string()` as
/// a plain-text body. On `Ok(())` the response is left exactly as the
/// function wrote it.
///
/// Bytes the function wrote before failing are not rolled back, and a
/// status it already committed is kept.
///
/// # Examples
///
/// ```
/// use handler_filters::{ErrorHandler, Handler, HandlerError, Request, Response};
/// use http::{Method, StatusCode};
///
/// let save = ErrorHandler::new(|_req: &mut Request, _res: &mut Response| {
///     Err(HandlerError::new("disk full"))
/// });
///
/// let mut res = Response::new();
/// save.handle(&mut Request::new(Method::POST, "/upload"), &mut res);
///
/// assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
/// assert_eq!(res.body_str(), Some("disk full"));
/// ```
#[derive(Clone, Copy)]
pub struct ErrorHandler<F> {
    f: F,
}

impl<F> ErrorHandler<F> {
    /// Wraps a fallible function.
    pub fn new<E>(f: F) -> Self
    where
        F: Fn(&mut Request, &mut Response) -> Result<(), E>,
        E: fmt::Display,
    {
        Self { f }
    }
}

impl<F> fmt::Debug for ErrorHandler<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorHandler").finish_non_exhaustive()
    }
}

impl<F, E> Handler for ErrorHandler<F>
where
    F: Fn(&mut Request, &mut Response) -> Result<(), E>,
    E: fmt::Display,
{
    fn handle(&self, req: &mut Request, res: &mut Response) {
        if let Err(e) = (self.f)(req, res) {
            let message = e.to_string();
            tracing::error!(
                method = %req.method(),
                path = %req.path(),
                error = %message,
                "handler failed"
            );
            write_error(res, &message);
        }
    }
}

/// Shorthand for [`ErrorHandler::new`].
pub fn error_handler<F, E>(f: F) -> ErrorHandler<F>
where
    F: Fn(&mut Request, &mut Response) -> Result<(), E>,
    E: fmt::Display,
{
    ErrorHandler::new(f)
}

fn write_error(res: &mut Response, message: &str) {
    res.insert_header(
        CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    res.insert_header(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    res.set_status(StatusCode::INTERNAL_SERVER_ERROR);
    res.write(message.as_bytes());
}
