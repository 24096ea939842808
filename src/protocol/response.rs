//! Response construction and serialization

use tokio::io::{AsyncWrite, AsyncWriteExt};

use super::Status;
use crate::constants::response::{CRLF, GEMTEXT_MIME, MAX_META};

/// One Gemini response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: Status,
    meta: String,
    body: Option<String>,
}

/// Make a meta string safe for the header line
///
/// Line breaks would end the header early, so they become spaces; overlong
/// values are cut on a character boundary.
fn sanitize_meta(meta: &str) -> String {
    let mut clean: String = meta
        .chars()
        .map(|c| if c == '\r' || c == '\n' { ' ' } else { c })
        .collect();

    if clean.len() > MAX_META {
        let mut cut = MAX_META;
        while !clean.is_char_boundary(cut) {
            cut -= 1;
        }
        clean.truncate(cut);
    }
    clean
}

impl Response {
    fn new(status: Status, meta: &str, body: Option<String>) -> Self {
        Self {
            status,
            meta: sanitize_meta(meta),
            body,
        }
    }

    /// `20` with a gemtext body
    #[must_use]
    pub fn success(body: impl Into<String>) -> Self {
        Self::new(Status::Success, GEMTEXT_MIME, Some(body.into()))
    }

    /// `10`, asking the client for a query string
    #[must_use]
    pub fn input(prompt: &str) -> Self {
        Self::new(Status::Input, prompt, None)
    }

    /// `40` with a human-readable reason
    #[must_use]
    pub fn temporary_failure(message: &str) -> Self {
        Self::new(Status::TemporaryFailure, message, None)
    }

    #[must_use]
    pub fn not_found(message: &str) -> Self {
        Self::new(Status::NotFound, message, None)
    }

    #[must_use]
    pub fn bad_request(message: &str) -> Self {
        Self::new(Status::BadRequest, message, None)
    }

    /// Any non-success status
    #[must_use]
    pub fn error(status: Status, message: &str) -> Self {
        Self::new(status, message, None)
    }

    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    #[must_use]
    pub fn meta(&self) -> &str {
        &self.meta
    }

    #[must_use]
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Header line including its terminator
    #[must_use]
    pub fn header(&self) -> String {
        format!("{} {}\r\n", self.status, self.meta)
    }

    /// Full wire representation
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let body = self.body.as_deref().unwrap_or_default();
        let mut bytes = Vec::with_capacity(self.meta.len() + body.len() + 5);
        bytes.extend_from_slice(self.status.to_string().as_bytes());
        bytes.push(b' ');
        bytes.extend_from_slice(self.meta.as_bytes());
        bytes.extend_from_slice(CRLF);
        bytes.extend_from_slice(body.as_bytes());
        bytes
    }

    /// Write the response and flush
    pub async fn write_to<W>(&self, writer: &mut W) -> std::io::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        writer.write_all(&self.to_bytes()).await?;
        writer.flush().await
    }
}
