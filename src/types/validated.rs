//! Validated string types that enforce invariants at construction time

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Validation errors for string and numeric types
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationError {
    #[error("port cannot be 0")]
    InvalidPort,

    #[error("invalid port number: {0}")]
    InvalidPortNumber(String),

    #[error("file path cannot be empty or whitespace")]
    EmptyFilePath,

    #[error("content id cannot be empty")]
    EmptyContentId,

    #[error("invalid content id: {0}")]
    InvalidContentId(String),
}

/// Macro to generate validated string newtypes.
///
/// Each type gets a validating `new()`, `as_str()`, `AsRef<str>`, `Deref`,
/// `Display`, `FromStr`, `TryFrom<String>` and serde impls that validate on the way in.
macro_rules! validated_string {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident(String) {
            validation: |$s_param:ident| $validation:expr,
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
        #[serde(transparent)]
        $vis struct $name(String);

        impl $name {
            #[doc = concat!("Create a new ", stringify!($name), " after validation")]
            pub fn new($s_param: String) -> Result<Self, ValidationError> {
                let validate = || $validation;
                validate()?;
                Ok(Self($s_param))
            }

            #[doc = concat!("Get the ", stringify!($name), " as a string slice")]
            #[must_use]
            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            #[inline]
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl std::ops::Deref for $name {
            type Target = str;

            #[inline]
            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s.to_string())
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from($s_param: String) -> Result<Self, Self::Error> {
                Self::new($s_param)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                Self::new(s).map_err(serde::de::Error::custom)
            }
        }
    };
}

validated_string! {
    /// A filesystem path that cannot be empty (certificate and key files)
    pub struct FilePath(String) {
        validation: |s| {
            if s.trim().is_empty() {
                Err(ValidationError::EmptyFilePath)
            } else {
                Ok(())
            }
        },
    }
}

validated_string! {
    /// An upstream content identifier taken from a request path
    ///
    /// Identifiers are opaque to the gateway but must be a single non-empty
    /// path segment, so they can never smuggle extra query parameters or
    /// path components into an upstream URL.
    ///
    /// # Examples
    /// ```
    /// use gemini_gateway::types::ContentId;
    ///
    /// assert!(ContentId::new("6075a1b2c3".to_string()).is_ok());
    /// assert!(ContentId::new("".to_string()).is_err());
    /// assert!(ContentId::new("a/b".to_string()).is_err());
    /// ```
    pub struct ContentId(String) {
        validation: |s| {
            if s.is_empty() {
                Err(ValidationError::EmptyContentId)
            } else if s.chars().any(|c| c == '/' || c.is_whitespace() || c.is_control()) {
                Err(ValidationError::InvalidContentId(s.clone()))
            } else {
                Ok(())
            }
        },
    }
}

impl FilePath {
    /// Construct from a known non-empty literal
    pub(crate) fn from_static(path: &'static str) -> Self {
        debug_assert!(!path.trim().is_empty());
        Self(path.to_string())
    }

    /// Borrow as a `Path`
    #[must_use]
    pub fn as_path(&self) -> &std::path::Path {
        std::path::Path::new(&self.0)
    }
}
