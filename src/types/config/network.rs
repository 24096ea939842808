//! Network-related configuration types

use std::num::NonZeroU16;
use std::str::FromStr;

use crate::types::ValidationError;

nonzero_newtype! {
    /// A validated network port number that cannot be zero
    ///
    /// # Examples
    /// ```
    /// use gemini_gateway::types::Port;
    ///
    /// let port = Port::new(1965).unwrap();
    /// assert_eq!(port.get(), 1965);
    ///
    /// // Port 0 is invalid
    /// assert!(Port::new(0).is_none());
    /// ```
    #[doc(alias = "port_number")]
    pub struct Port(NonZeroU16: u16, serialize as serialize_u16);
}

impl Port {
    /// Standard Gemini port (1965)
    pub const GEMINI: Self = Self(NonZeroU16::new(1965).unwrap());
}

impl Default for Port {
    fn default() -> Self {
        Self::GEMINI
    }
}

impl FromStr for Port {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let port = s
            .parse::<u16>()
            .map_err(|_| ValidationError::InvalidPortNumber(s.to_string()))?;
        Self::new(port).ok_or(ValidationError::InvalidPort)
    }
}
