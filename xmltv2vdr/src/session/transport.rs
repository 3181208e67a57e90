//! Byte transports the session runs over.

use std::collections::VecDeque;
use std::io::{self, Write};

use async_trait::async_trait;
use log::debug;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use xmltv2vdr_protocol::{Command, ReplyCode, DATA_END};

/// Line-oriented duplex connection to the receiver.
#[async_trait]
pub trait Transport: Send {
    /// Transmit bytes as they are.
    async fn send(&mut self, data: &[u8]) -> io::Result<()>;

    /// Read one line without its terminator. `None` once the peer closed
    /// the connection.
    async fn read_line(&mut self) -> io::Result<Option<Vec<u8>>>;
}

/// Live TCP connection.
pub struct TcpTransport {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
}

impl TcpTransport {
    pub async fn connect(address: &str) -> io::Result<Self> {
        let stream = TcpStream::connect(address).await?;
        stream.set_nodelay(true)?;
        Ok(Self::from_stream(stream))
    }

    pub fn from_stream(stream: TcpStream) -> Self {
        let (reader, writer) = stream.into_split();
        Self {
            reader: BufReader::new(reader),
            writer,
        }
    }
}

#[async_trait]
impl Transport for TcpTransport {
    async fn send(&mut self, data: &[u8]) -> io::Result<()> {
        self.writer.write_all(data).await?;
        self.writer.flush().await
    }

    async fn read_line(&mut self) -> io::Result<Option<Vec<u8>>> {
        let mut line = Vec::new();
        if self.reader.read_until(b'\n', &mut line).await? == 0 {
            return Ok(None);
        }
        strip_line_end(&mut line);
        Ok(Some(line))
    }
}

fn strip_line_end(line: &mut Vec<u8>) {
    if line.last() == Some(&b'\n') {
        line.pop();
    }
    if line.last() == Some(&b'\r') {
        line.pop();
    }
}

/// Local stand-in for the receiver.
///
/// Every transmitted byte goes to `sink` and the replies a receiver would
/// give are synthesized, so the session runs exactly as against a live
/// connection.
pub struct SimulatedTransport<W: Write + Send> {
    sink: W,
    /// Bytes of a line not yet terminated.
    partial: Vec<u8>,
    replies: VecDeque<Vec<u8>>,
    /// Inside a data transfer started by PUTE.
    data_mode: bool,
}

impl<W: Write + Send> SimulatedTransport<W> {
    pub fn new(sink: W) -> Self {
        let mut transport = Self {
            sink,
            partial: Vec::new(),
            replies: VecDeque::new(),
            data_mode: false,
        };
        transport.reply(ReplyCode::ServiceReady.into(), "simulated receiver ready");
        transport
    }

    pub fn into_sink(self) -> W {
        self.sink
    }

    fn reply(&mut self, code: u16, text: &str) {
        self.replies.push_back(format!("{} {}", code, text).into_bytes());
    }

    fn handle_line(&mut self, line: &[u8]) {
        let line = String::from_utf8_lossy(line);
        let line = line.trim_end();

        if self.data_mode {
            if line == DATA_END {
                self.data_mode = false;
                self.reply(ReplyCode::ActionOk.into(), "EPG data processed");
            }
            return;
        }

        match Command::from_keyword(line.trim()) {
            Some(Command::ClearSchedule) => self.reply(ReplyCode::ActionOk.into(), "EPG data cleared"),
            Some(Command::PutSchedule) => {
                self.data_mode = true;
                self.reply(
                    ReplyCode::StartData.into(),
                    "Enter EPG data, end with \".\" on a line by itself",
                );
            }
            Some(Command::Quit) => self.reply(ReplyCode::Closing.into(), "closing connection"),
            None => {
                debug!("Simulated receiver got unknown command {:?}", line);
                self.reply(500, "Command unrecognized");
            }
        }
    }
}

#[async_trait]
impl<W: Write + Send> Transport for SimulatedTransport<W> {
    async fn send(&mut self, data: &[u8]) -> io::Result<()> {
        self.sink.write_all(data)?;
        self.sink.flush()?;

        self.partial.extend_from_slice(data);
        while let Some(pos) = self.partial.iter().position(|&b| b == b'\n') {
            let mut line: Vec<u8> = self.partial.drain(..=pos).collect();
            strip_line_end(&mut line);
            self.handle_line(&line);
        }
        Ok(())
    }

    async fn read_line(&mut self) -> io::Result<Option<Vec<u8>>> {
        Ok(self.replies.pop_front())
    }
}
