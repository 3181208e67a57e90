//! Error types for the receiver line protocol.

use thiserror::Error;

/// Protocol-level errors that can occur while framing replies or
/// encoding outbound data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Reply line does not start with a three digit code.
    #[error("Malformed reply line: {0:?}")]
    MalformedReply(String),

    /// Empty reply line.
    #[error("Empty reply")]
    EmptyReply,

    /// Charset label is not known.
    #[error("Unknown charset: {0}")]
    UnknownCharset(String),
}
