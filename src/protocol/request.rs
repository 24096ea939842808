//! Request line reading and validation

use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, BufReader};
use url::Url;

use super::Status;
use crate::constants::request::{MAX_LINE, MAX_URL, SCHEME};

/// Why a request line was rejected
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RequestError {
    #[error("request line exceeds {MAX_URL} bytes")]
    TooLong,

    /// Connection closed before a line terminator arrived
    #[error("request line not terminated")]
    Unterminated,

    #[error("request line is not valid UTF-8")]
    NotUtf8,

    #[error("empty request")]
    Empty,

    #[error("invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("unsupported scheme '{0}'")]
    UnsupportedScheme(String),

    #[error("failed to read request: {0}")]
    Io(#[from] std::io::Error),
}

impl RequestError {
    /// Status sent back for this rejection
    #[must_use]
    pub const fn status(&self) -> Status {
        match self {
            Self::UnsupportedScheme(_) => Status::ProxyRequestRefused,
            _ => Status::BadRequest,
        }
    }
}

/// Validate a raw request line (terminator included)
///
/// CRLF is the standard terminator; a bare LF is tolerated.
pub fn parse_request(line: &[u8]) -> Result<Url, RequestError> {
    let Some(line) = line.strip_suffix(b"\n") else {
        return Err(if line.len() >= MAX_LINE {
            RequestError::TooLong
        } else {
            RequestError::Unterminated
        });
    };
    let line = line.strip_suffix(b"\r").unwrap_or(line);

    if line.len() > MAX_URL {
        return Err(RequestError::TooLong);
    }
    if line.is_empty() {
        return Err(RequestError::Empty);
    }

    let text = std::str::from_utf8(line).map_err(|_| RequestError::NotUtf8)?;
    let url = Url::parse(text)?;

    if url.scheme() != SCHEME {
        return Err(RequestError::UnsupportedScheme(url.scheme().to_string()));
    }

    Ok(url)
}

/// Read and validate one request line from a client stream
///
/// Never reads more than the maximum line length, so a client cannot make
/// the server buffer an unbounded line.
pub async fn read_request<R>(stream: R) -> Result<Url, RequestError>
where
    R: AsyncRead + Unpin,
{
    let mut line = Vec::with_capacity(MAX_LINE);
    let mut reader = BufReader::new(stream).take(MAX_LINE as u64);
    reader.read_until(b'\n', &mut line).await?;
    parse_request(&line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_crlf_request() {
        let url = parse_request(b"gemini://example.org/story/abc\r\n").unwrap();
        assert_eq!(url.path(), "/story/abc");
        assert_eq!(url.host_str(), Some("example.org"));
    }

    #[test]
    fn test_parse_tolerates_bare_lf() {
        let url = parse_request(b"gemini://example.org/\n").unwrap();
        assert_eq!(url.path(), "/");
    }

    #[test]
    fn test_parse_keeps_query() {
        let url = parse_request(b"gemini://example.org/search?dark%20night\r\n").unwrap();
        assert_eq!(url.query(), Some("dark%20night"));
    }

    #[test]
    fn test_rejects_other_schemes() {
        let err = parse_request(b"https://example.org/\r\n").unwrap_err();
        assert!(matches!(err, RequestError::UnsupportedScheme(ref s) if s == "https"));
        assert_eq!(err.status(), Status::ProxyRequestRefused);
    }

    #[test]
    fn test_rejects_relative_and_empty() {
        let err = parse_request(b"/story/abc\r\n").unwrap_err();
        assert!(matches!(err, RequestError::InvalidUrl(_)));
        assert_eq!(err.status(), Status::BadRequest);

        assert!(matches!(parse_request(b"\r\n"), Err(RequestError::Empty)));
    }

    #[test]
    fn test_rejects_non_utf8() {
        assert!(matches!(
            parse_request(b"gemini://example.org/\xff\r\n"),
            Err(RequestError::NotUtf8)
        ));
    }

    #[test]
    fn test_length_limit() {
        let prefix = "gemini://example.org/";
        let exact = format!("{}{}\r\n", prefix, "a".repeat(MAX_URL - prefix.len()));
        assert!(parse_request(exact.as_bytes()).is_ok());

        let over = format!("{}{}\r\n", prefix, "a".repeat(MAX_URL - prefix.len() + 1));
        assert!(matches!(
            parse_request(over.as_bytes()),
            Err(RequestError::TooLong)
        ));
    }

    #[test]
    fn test_unterminated() {
        assert!(matches!(
            parse_request(b"gemini://example.org/"),
            Err(RequestError::Unterminated)
        ));
    }

    #[tokio::test]
    async fn test_read_request_from_stream() {
        let input: &[u8] = b"gemini://example.org/latest\r\nignored";
        let url = read_request(input).await.unwrap();
        assert_eq!(url.path(), "/latest");
    }

    #[tokio::test]
    async fn test_read_request_stops_at_limit() {
        let input = vec![b'a'; MAX_LINE * 4];
        let err = read_request(input.as_slice()).await.unwrap_err();
        assert!(matches!(err, RequestError::TooLong));
    }
}
