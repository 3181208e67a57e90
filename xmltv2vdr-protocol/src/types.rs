//! Message type definitions for the receiver line protocol.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default TCP port of the receiver's remote control interface.
pub const DEFAULT_PORT: u16 = 6419;

/// Line terminator used for every command and data line.
pub const CRLF: &str = "\r\n";

/// Line that closes a per-channel record block.
pub const CHANNEL_END: &str = "c";

/// Line that ends a data transfer started with [`Command::PutSchedule`].
pub const DATA_END: &str = ".";

/// Reply codes the client expects at the various session stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u16)]
pub enum ReplyCode {
    /// Service ready (greeting banner).
    ServiceReady = 220,
    /// Service closing the connection (QUIT acknowledged).
    Closing = 221,
    /// Requested action completed.
    ActionOk = 250,
    /// Ready to receive data, end with "." on a line by itself.
    StartData = 354,
}

impl TryFrom<u16> for ReplyCode {
    type Error = u16;

    fn try_from(value: u16) -> Result<Self, u16> {
        match value {
            220 => Ok(ReplyCode::ServiceReady),
            221 => Ok(ReplyCode::Closing),
            250 => Ok(ReplyCode::ActionOk),
            354 => Ok(ReplyCode::StartData),
            _ => Err(value),
        }
    }
}

impl From<ReplyCode> for u16 {
    fn from(value: ReplyCode) -> Self {
        value as u16
    }
}

impl fmt::Display for ReplyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", *self as u16)
    }
}

/// Commands sent from the client to the receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Clear the receiver's existing schedule (`CLRE`).
    ClearSchedule,
    /// Begin a put-record transaction (`PUTE`).
    PutSchedule,
    /// Close the session (`QUIT`).
    Quit,
}

impl Command {
    /// Command keyword as sent on the wire.
    pub fn keyword(&self) -> &'static str {
        match self {
            Command::ClearSchedule => "CLRE",
            Command::PutSchedule => "PUTE",
            Command::Quit => "QUIT",
        }
    }

    /// Reply code that acknowledges this command.
    pub fn expected_reply(&self) -> ReplyCode {
        match self {
            Command::ClearSchedule => ReplyCode::ActionOk,
            Command::PutSchedule => ReplyCode::StartData,
            Command::Quit => ReplyCode::Closing,
        }
    }

    /// Parse a command keyword (case-insensitive).
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.to_ascii_uppercase().as_str() {
            "CLRE" => Some(Command::ClearSchedule),
            "PUTE" => Some(Command::PutSchedule),
            "QUIT" => Some(Command::Quit),
            _ => None,
        }
    }
}

/// A complete reply: the final line's code plus every line received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Three digit code taken from the final line.
    pub code: u16,
    /// Reply lines without their terminators, in arrival order.
    pub lines: Vec<String>,
}

impl Reply {
    /// Returns true if the code equals `expected`.
    pub fn is(&self, expected: ReplyCode) -> bool {
        self.code == u16::from(expected)
    }

    /// Reply text joined with `" / "`, for diagnostics.
    pub fn text(&self) -> String {
        self.lines.join(" / ")
    }
}

/// Receiver-side channel addressing.
///
/// A channel is addressed by its network-id triple when the descriptor
/// carries a network or transport stream id, otherwise by its frequency.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChannelSelector {
    /// `Source-NID-TID-SID[-RID]`
    Network {
        source: String,
        nid: u32,
        tid: u32,
        sid: u32,
        rid: u32,
    },

    /// `Source-0-Frequency-SID[-RID]`
    Frequency {
        source: String,
        frequency: u32,
        sid: u32,
        rid: u32,
    },
}

impl ChannelSelector {
    /// Build a selector from descriptor fields, choosing the addressing
    /// mode from whether a network or transport stream id is present.
    pub fn from_descriptor(
        source: impl Into<String>,
        frequency: u32,
        sid: u32,
        nid: u32,
        tid: u32,
        rid: u32,
    ) -> Self {
        let source = source.into();
        if nid != 0 || tid != 0 {
            Self::Network {
                source,
                nid,
                tid,
                sid,
                rid,
            }
        } else {
            Self::Frequency {
                source,
                frequency,
                sid,
                rid,
            }
        }
    }

    /// Returns true if the channel is addressed by frequency.
    pub fn is_frequency(&self) -> bool {
        matches!(self, Self::Frequency { .. })
    }
}

impl fmt::Display for ChannelSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rid = match self {
            ChannelSelector::Network {
                source,
                nid,
                tid,
                sid,
                rid,
            } => {
                write!(f, "{}-{}-{}-{}", source, nid, tid, sid)?;
                *rid
            }
            ChannelSelector::Frequency {
                source,
                frequency,
                sid,
                rid,
            } => {
                write!(f, "{}-0-{}-{}", source, frequency, sid)?;
                *rid
            }
        };
        if rid != 0 {
            write!(f, "-{}", rid)?;
        }
        Ok(())
    }
}
