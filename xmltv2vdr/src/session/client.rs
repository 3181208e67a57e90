//! Session client pushing channel record blocks to the receiver.
//!
//! ```text
//! AwaitBanner ─220─▶ Ready ─CLRE─▶ AwaitClearAck ─250─▶ Ready
//! Ready ─PUTE─▶ AwaitPutAck ─354─▶ AwaitCommitAck ─250─▶ Ready   (per channel)
//! Ready ─QUIT─▶ AwaitQuitAck ─221─▶ Closed
//! ```
//!
//! Any other reply code fails the session. Nothing is sent after a failure.

use log::{debug, info};
use tokio::time::{timeout_at, Instant};
use xmltv2vdr_protocol::{
    encode_command, encode_data_block, Charset, Command, Reply, ReplyAssembler, ReplyCode,
};

use super::transport::Transport;
use super::{Result, SessionError};
use crate::epg::ChannelRecordStore;
use crate::lookup::ChannelTable;

/// Session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitBanner,
    Ready,
    AwaitClearAck,
    AwaitPutAck,
    AwaitCommitAck,
    AwaitQuitAck,
    Closed,
    Failed,
}

impl SessionState {
    /// Stage name used in error messages.
    fn stage(&self) -> &'static str {
        match self {
            SessionState::AwaitBanner => "greeting",
            SessionState::Ready => "ready",
            SessionState::AwaitClearAck => "CLRE",
            SessionState::AwaitPutAck => "PUTE",
            SessionState::AwaitCommitAck => "data transfer",
            SessionState::AwaitQuitAck => "QUIT",
            SessionState::Closed => "closed",
            SessionState::Failed => "failed",
        }
    }
}

/// Summary of a completed delivery.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    /// Channels whose records were accepted.
    pub channels: usize,
    /// Encoded bytes transmitted, commands included.
    pub bytes: usize,
}

pub struct SessionClient<T: Transport> {
    transport: T,
    charset: Charset,
    /// Covers the whole session, connect through quit.
    deadline: Instant,
    state: SessionState,
    assembler: ReplyAssembler,
    report: DeliveryReport,
}

impl<T: Transport> SessionClient<T> {
    /// Wrap a connected transport. The greeting has not been read yet.
    pub fn new(transport: T, charset: Charset, deadline: Instant) -> Self {
        Self {
            transport,
            charset,
            deadline,
            state: SessionState::AwaitBanner,
            assembler: ReplyAssembler::new(),
            report: DeliveryReport::default(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Run the whole session: greeting, clear, one transfer per channel
    /// with records, quit.
    pub async fn deliver(
        &mut self,
        store: &ChannelRecordStore,
        channels: &ChannelTable,
    ) -> Result<DeliveryReport> {
        let result = self.run(store, channels).await;
        if result.is_err() {
            self.state = SessionState::Failed;
        }
        result
    }

    async fn run(
        &mut self,
        store: &ChannelRecordStore,
        channels: &ChannelTable,
    ) -> Result<DeliveryReport> {
        let banner = self.expect(ReplyCode::ServiceReady).await?;
        info!("Receiver: {}", banner.text());
        self.state = SessionState::Ready;

        self.command(Command::ClearSchedule, SessionState::AwaitClearAck)
            .await?;
        self.state = SessionState::Ready;

        for (alias, records) in store.iter() {
            if records.is_empty() {
                continue;
            }
            let Some(entry) = channels.get(alias) else {
                debug!("No channel entry for {}, records not sent", alias);
                continue;
            };

            self.command(Command::PutSchedule, SessionState::AwaitPutAck)
                .await?;

            let block = encode_data_block(&entry.selector, &entry.name, records, self.charset);
            self.state = SessionState::AwaitCommitAck;
            self.send(&block).await?;
            self.expect(ReplyCode::ActionOk).await?;
            self.state = SessionState::Ready;

            self.report.channels += 1;
            info!(
                "Sent {} ({}, {} bytes)",
                entry.name,
                entry.selector,
                block.len()
            );
        }

        self.command(Command::Quit, SessionState::AwaitQuitAck).await?;
        self.state = SessionState::Closed;

        Ok(self.report)
    }

    /// Send a command and wait for its acknowledgement.
    async fn command(&mut self, command: Command, awaiting: SessionState) -> Result<Reply> {
        self.state = awaiting;
        self.send(&encode_command(command)).await?;
        self.expect(command.expected_reply()).await
    }

    async fn send(&mut self, data: &[u8]) -> Result<()> {
        let stage = self.state.stage();
        timeout_at(self.deadline, self.transport.send(data))
            .await
            .map_err(|_| SessionError::DeadlineExceeded(stage))??;
        self.report.bytes += data.len();
        Ok(())
    }

    /// Read a reply and check its code against `expected`.
    async fn expect(&mut self, expected: ReplyCode) -> Result<Reply> {
        let reply = self.read_reply().await?;
        if !reply.is(expected) {
            return Err(SessionError::UnexpectedReply {
                stage: self.state.stage(),
                expected,
                received: reply.code,
                text: reply.text(),
            });
        }
        Ok(reply)
    }

    /// Read lines until a final reply line arrives.
    async fn read_reply(&mut self) -> Result<Reply> {
        let stage = self.state.stage();
        loop {
            let line = timeout_at(self.deadline, self.transport.read_line())
                .await
                .map_err(|_| SessionError::DeadlineExceeded(stage))??
                .ok_or(SessionError::ConnectionClosed(stage))?;

            let line = self.charset.decode(&line);
            debug!("< {}", line);
            if let Some(reply) = self.assembler.push_line(&line)? {
                return Ok(reply);
            }
        }
    }
}
