//! Line protocol definitions for pushing EPG records to a VDR receiver.
//!
//! The receiver speaks a synchronous request/reply protocol: every command
//! is a CRLF terminated line and every reply is one or more lines starting
//! with a three digit code.
//!
//! # Reply Format
//!
//! ```text
//! 250-continuation line   (4th column is not a space)
//! 250 final line          (4th column is a space)
//! ```
//!
//! # Example
//!
//! ```rust
//! use xmltv2vdr_protocol::{encode_command, ChannelSelector, Command, ReplyAssembler, ReplyCode};
//!
//! let line = encode_command(Command::ClearSchedule);
//! assert_eq!(&line[..], b"CLRE\r\n");
//!
//! let mut replies = ReplyAssembler::new();
//! let reply = replies.push_line("250 EPG data cleared").unwrap().unwrap();
//! assert!(reply.is(ReplyCode::ActionOk));
//!
//! let selector = ChannelSelector::from_descriptor("S19.2E", 11954, 28106, 1, 1101, 0);
//! assert_eq!(selector.to_string(), "S19.2E-1-1101-28106");
//! ```

pub mod codec;
pub mod error;
pub mod types;

pub use codec::{
    build_data_block, encode_command, encode_data_block, parse_reply_line, Charset,
    ReplyAssembler, CODE_LEN,
};
pub use error::ProtocolError;
pub use types::{
    ChannelSelector, Command, Reply, ReplyCode, CHANNEL_END, CRLF, DATA_END, DEFAULT_PORT,
};
