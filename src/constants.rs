//! Constants used throughout the Gemini gateway
//!
//! This module centralizes protocol limits and fixed strings
//! to improve maintainability and reduce duplication.

/// Request line limits
pub mod request {
    /// Maximum length of the request URL, excluding CRLF
    pub const MAX_URL: usize = 1024;

    /// Maximum bytes read before a line terminator must have appeared
    pub const MAX_LINE: usize = MAX_URL + 2;

    /// URL scheme the gateway serves
    pub const SCHEME: &str = "gemini";
}

/// Response header constants
pub mod response {
    /// Maximum length of the meta field
    pub const MAX_META: usize = 1024;

    /// Meta of successful gemtext responses
    pub const GEMTEXT_MIME: &str = "text/gemini; charset=utf-8";

    /// Header line terminator
    pub const CRLF: &[u8] = b"\r\n";
}

/// Prompts and fixed messages shown to clients
pub mod message {
    /// Prompt of the search input request
    pub const SEARCH_PROMPT: &str = "What are you looking for?";

    pub const NOT_FOUND: &str = "Not found";

    pub const BAD_PAGE: &str = "Page must be a number";

    pub const BAD_ID: &str = "Invalid identifier";
}

#[cfg(test)]
#[allow(clippy::assertions_on_constants)]
mod tests {
    use super::*;

    #[test]
    fn test_line_limit_includes_terminator() {
        assert_eq!(request::MAX_LINE, request::MAX_URL + response::CRLF.len());
    }

    #[test]
    fn test_gemtext_mime_fits_meta() {
        assert!(response::GEMTEXT_MIME.len() <= response::MAX_META);
        assert!(message::SEARCH_PROMPT.len() <= response::MAX_META);
    }
}
