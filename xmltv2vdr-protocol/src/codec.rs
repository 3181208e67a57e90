//! Codec for encoding commands and data blocks and framing replies.
//!
//! Reply format:
//! ```text
//! 250-first line          <- 4th column not a space: more lines follow
//! 250-second line
//! 250 last line           <- 4th column is a space: reply complete
//! ```
//!
//! Data block format (sent after a `354` reply to `PUTE`):
//! ```text
//! C <channel-id> <name>
//! E ... / T ... / ... / e  <- record lines, CRLF terminated
//! c
//! .
//! ```

use bytes::{BufMut, Bytes, BytesMut};
use encoding_rs::Encoding;

use crate::error::ProtocolError;
use crate::types::*;

/// Length of the numeric code that starts every reply line.
pub const CODE_LEN: usize = 3;

/// Encode a command line.
pub fn encode_command(cmd: Command) -> Bytes {
    let mut buf = BytesMut::with_capacity(cmd.keyword().len() + CRLF.len());
    buf.put_slice(cmd.keyword().as_bytes());
    buf.put_slice(CRLF.as_bytes());
    buf.freeze()
}

/// Parse one reply line into its code and whether it is the final line.
///
/// A line is final when it has no 4th column or the 4th column is a space.
pub fn parse_reply_line(line: &str) -> Result<(u16, bool), ProtocolError> {
    let bytes = line.as_bytes();
    if bytes.is_empty() {
        return Err(ProtocolError::EmptyReply);
    }
    if bytes.len() < CODE_LEN || !bytes[..CODE_LEN].iter().all(u8::is_ascii_digit) {
        return Err(ProtocolError::MalformedReply(line.to_string()));
    }
    let code = bytes[..CODE_LEN]
        .iter()
        .fold(0u16, |acc, b| acc * 10 + u16::from(b - b'0'));
    let is_final = bytes.get(CODE_LEN).map_or(true, |&b| b == b' ');
    Ok((code, is_final))
}

/// Collects reply lines until the final one arrives.
#[derive(Debug, Default)]
pub struct ReplyAssembler {
    lines: Vec<String>,
}

impl ReplyAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one line (without terminator). Returns the complete reply once
    /// the final line has been seen; the assembler is then empty again.
    pub fn push_line(&mut self, line: &str) -> Result<Option<Reply>, ProtocolError> {
        let (code, is_final) = parse_reply_line(line)?;
        self.lines.push(line.to_string());
        if !is_final {
            return Ok(None);
        }
        Ok(Some(Reply {
            code,
            lines: std::mem::take(&mut self.lines),
        }))
    }

    /// Number of continuation lines buffered so far.
    pub fn pending(&self) -> usize {
        self.lines.len()
    }
}

/// Fixed byte encoding applied to text right before transmission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Charset {
    encoding: &'static Encoding,
}

impl Charset {
    /// Look up a charset by its WHATWG label (e.g. `iso-8859-1`, `utf-8`).
    pub fn for_label(label: &str) -> Result<Self, ProtocolError> {
        Encoding::for_label(label.trim().as_bytes())
            .map(|encoding| Self { encoding })
            .ok_or_else(|| ProtocolError::UnknownCharset(label.to_string()))
    }

    pub fn name(&self) -> &'static str {
        self.encoding.name()
    }

    /// Encode text. Unmappable characters become numeric character
    /// references.
    pub fn encode(&self, text: &str) -> Bytes {
        let (bytes, _, _) = self.encoding.encode(text);
        Bytes::copy_from_slice(&bytes)
    }

    /// Decode received bytes, replacing malformed sequences.
    pub fn decode(&self, bytes: &[u8]) -> String {
        let (text, _, _) = self.encoding.decode(bytes);
        text.into_owned()
    }
}

impl Default for Charset {
    fn default() -> Self {
        Self {
            encoding: encoding_rs::WINDOWS_1252,
        }
    }
}

/// Build the text of a per-channel data block.
///
/// `records` must already be CRLF terminated.
pub fn build_data_block(selector: &ChannelSelector, name: &str, records: &str) -> String {
    let mut block = String::with_capacity(records.len() + name.len() + 48);
    block.push_str("C ");
    block.push_str(&selector.to_string());
    block.push(' ');
    block.push_str(name);
    block.push_str(CRLF);
    block.push_str(records);
    block.push_str(CHANNEL_END);
    block.push_str(CRLF);
    block.push_str(DATA_END);
    block.push_str(CRLF);
    block
}

/// Build and encode a per-channel data block.
pub fn encode_data_block(
    selector: &ChannelSelector,
    name: &str,
    records: &str,
    charset: Charset,
) -> Bytes {
    charset.encode(&build_data_block(selector, name, records))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_command() {
        assert_eq!(&encode_command(Command::ClearSchedule)[..], b"CLRE\r\n");
        assert_eq!(&encode_command(Command::PutSchedule)[..], b"PUTE\r\n");
        assert_eq!(&encode_command(Command::Quit)[..], b"QUIT\r\n");
    }

    #[test]
    fn test_parse_reply_line() {
        assert_eq!(parse_reply_line("220 vdr SVDRP ready").unwrap(), (220, true));
        assert_eq!(parse_reply_line("250-more follows").unwrap(), (250, false));
        assert_eq!(parse_reply_line("221").unwrap(), (221, true));
        assert!(matches!(
            parse_reply_line("OK"),
            Err(ProtocolError::MalformedReply(_))
        ));
        assert!(matches!(
            parse_reply_line("2x0 nope"),
            Err(ProtocolError::MalformedReply(_))
        ));
        assert!(matches!(parse_reply_line(""), Err(ProtocolError::EmptyReply)));
    }

    #[test]
    fn test_reply_assembler_multiline() {
        let mut asm = ReplyAssembler::new();
        assert_eq!(asm.push_line("214-This is a help").unwrap(), None);
        assert_eq!(asm.push_line("214-text spanning").unwrap(), None);
        assert_eq!(asm.pending(), 2);

        let reply = asm.push_line("214 End of HELP info").unwrap().unwrap();
        assert_eq!(reply.code, 214);
        assert_eq!(reply.lines.len(), 3);
        assert_eq!(asm.pending(), 0);
    }

    #[test]
    fn test_reply_assembler_uses_final_line_code() {
        let mut asm = ReplyAssembler::new();
        assert_eq!(asm.push_line("250-cleared").unwrap(), None);
        let reply = asm.push_line("451 but then failed").unwrap().unwrap();
        assert_eq!(reply.code, 451);
        assert!(!reply.is(ReplyCode::ActionOk));
    }

    #[test]
    fn test_data_block_layout() {
        let sel = ChannelSelector::from_descriptor("S19.2E", 11954, 28106, 1, 1101, 0);
        let block = build_data_block(&sel, "ZDF", "E 1 2 3 0\r\ne\r\n");
        assert_eq!(
            block,
            "C S19.2E-1-1101-28106 ZDF\r\nE 1 2 3 0\r\ne\r\nc\r\n.\r\n"
        );
    }

    #[test]
    fn test_charset_encoding() {
        let latin1 = Charset::for_label("iso-8859-1").unwrap();
        assert_eq!(latin1.name(), "windows-1252");
        assert_eq!(&latin1.encode("Größe")[..], b"Gr\xf6\xdfe");
        assert_eq!(latin1.decode(b"Gr\xf6\xdfe"), "Größe");

        let utf8 = Charset::for_label("utf-8").unwrap();
        assert_eq!(&utf8.encode("ä")[..], "ä".as_bytes());

        assert!(matches!(
            Charset::for_label("klingon"),
            Err(ProtocolError::UnknownCharset(_))
        ));
    }
}
