//! Gemini protocol handling module
//!
//! A Gemini exchange is one request line from the client (an absolute URL
//! followed by CRLF) and one response: a `<status> <meta>` header line,
//! followed by a body only for success responses. The connection is closed
//! after every response.

mod request;
mod response;
mod status;

pub use request::{RequestError, parse_request, read_request};
pub use response::Response;
pub use status::Status;
