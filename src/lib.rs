//! Composable HTTP request filters.
//!
//! Each filter wraps an inner [`Handler`] and is a [`Handler`] itself, so
//! filters nest in any order:
//! - [`ExtensionFilter`]: moves a trailing file extension from the path into
//!   the `:extension` query parameter
//! - [`ErrorHandler`]: turns a fallible function into a handler that answers
//!   errors with `500 Internal Server Error`
//! - [`QueryFilter`]: drops the query string on every non-`GET` request
//!
//! A single `&mut Request` flows through the chain. Filters only rewrite the
//! request; the response is written by the innermost handler.
//!
//! # Examples
//!
//! ```
//! use handler_filters::{
//!     ErrorHandler, ExtensionFilter, Handler, HandlerError, QueryFilter, Request, Response,
//! };
//! use http::{Method, StatusCode};
//!
//! let app = ErrorHandler::new(|req: &mut Request, res: &mut Response| {
//!     match req.extension().as_deref() {
//!         Some(".csv") => {
//!             res.write(format!("csv for {}", req.path()).as_bytes());
//!             Ok(())
//!         }
//!         _ => Err(HandlerError::new("unsupported format")),
//!     }
//! });
//! let chain = ExtensionFilter::new(QueryFilter::new(app));
//!
//! let mut res = Response::new();
//! chain.handle(&mut Request::new(Method::GET, "/report.CSV"), &mut res);
//! assert_eq!(res.body_str(), Some("csv for /report"));
//!
//! let mut res = Response::new();
//! chain.handle(&mut Request::new(Method::GET, "/report"), &mut res);
//! assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
//! assert_eq!(res.body_str(), Some("unsupported format"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod error_handler;
mod extension;
mod handler;
mod query;
mod query_filter;
mod request;
mod response;

pub use error::HandlerError;
pub use error_handler::{error_handler, ErrorHandler};
pub use extension::{extract_extension, ExtensionFilter, Extracted, EXTENSION_PARAM};
pub use handler::{handler_fn, Handler, HandlerExt, HandlerFn};
pub use query::QueryParams;
pub use query_filter::QueryFilter;
pub use request::Request;
pub use response::Response;
