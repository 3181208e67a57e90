//! Delivery of channel records to the receiver.
//!
//! One connection, one deadline for the whole exchange, no retries. The
//! connection is dropped on every exit path.

mod client;
mod transport;

pub use client::{DeliveryReport, SessionClient, SessionState};
pub use transport::{SimulatedTransport, TcpTransport, Transport};

use log::{debug, info};
use thiserror::Error;
use tokio::time::{timeout_at, Instant};
use xmltv2vdr_protocol::{Charset, ProtocolError, ReplyCode};

use crate::config::{SessionConfig, SimulationTarget};
use crate::epg::ChannelRecordStore;
use crate::lookup::ChannelTable;

/// Session error types. All of them end the run.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Failed to connect to {address}: {source}")]
    Connect {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to open simulation output {path}: {source}")]
    SimulationOutput {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unexpected reply during {stage}: expected {expected}, got {received} ({text})")]
    UnexpectedReply {
        stage: &'static str,
        expected: ReplyCode,
        received: u16,
        text: String,
    },

    #[error("Connection closed by receiver during {0}")]
    ConnectionClosed(&'static str),

    #[error("Session deadline exceeded during {0}")]
    DeadlineExceeded(&'static str),

    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),
}

pub type Result<T> = std::result::Result<T, SessionError>;

/// Deliver every channel with records, over TCP or to the simulation sink.
pub async fn deliver(
    config: &SessionConfig,
    store: &ChannelRecordStore,
    channels: &ChannelTable,
) -> Result<DeliveryReport> {
    let charset = Charset::for_label(&config.charset)?;
    let deadline = Instant::now() + config.timeout;
    debug!(
        "Sending records as {} (configured as {})",
        charset.name(),
        config.charset
    );

    match &config.simulate {
        None => {
            let address = config.address();
            info!("Connecting to {}", address);
            let transport = timeout_at(deadline, TcpTransport::connect(&address))
                .await
                .map_err(|_| SessionError::DeadlineExceeded("connect"))?
                .map_err(|source| SessionError::Connect {
                    address: address.clone(),
                    source,
                })?;
            run(transport, charset, deadline, store, channels).await
        }
        Some(SimulationTarget::Stdout) => {
            info!("Simulating session, output to stdout");
            let transport = SimulatedTransport::new(std::io::stdout());
            run(transport, charset, deadline, store, channels).await
        }
        Some(SimulationTarget::File(path)) => {
            info!("Simulating session, output to {}", path.display());
            let file = std::fs::File::create(path).map_err(|source| {
                SessionError::SimulationOutput {
                    path: path.clone(),
                    source,
                }
            })?;
            let transport = SimulatedTransport::new(std::io::BufWriter::new(file));
            run(transport, charset, deadline, store, channels).await
        }
    }
}

async fn run<T: Transport>(
    transport: T,
    charset: Charset,
    deadline: Instant,
    store: &ChannelRecordStore,
    channels: &ChannelTable,
) -> Result<DeliveryReport> {
    let mut client = SessionClient::new(transport, charset, deadline);
    client.deliver(store, channels).await
}
