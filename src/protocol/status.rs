//! Gemini status codes
//!
//! Only the codes the gateway actually sends are modelled.

use std::fmt;

/// Two-digit response status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Status {
    /// Prompt the user for a query string
    Input = 10,
    /// Body follows
    Success = 20,
    /// Resolution failed, retrying later may succeed
    TemporaryFailure = 40,
    NotFound = 51,
    /// Request was for a host or scheme this server does not serve
    ProxyRequestRefused = 53,
    BadRequest = 59,
}

impl Status {
    #[must_use]
    pub const fn code(&self) -> u8 {
        *self as u8
    }

    /// Whether a body follows the header
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
