//! Sinks for collected events.
//!
//! Pollers share one publisher and call it concurrently, implementations must be `Send + Sync`.

use crate::{
    error::PublishError,
    event::Event,
};
use std::{
    fs::OpenOptions,
    io::{
        self,
        BufWriter,
        Write,
    },
    path::Path,
    sync::{
        Mutex,
        PoisonError,
    },
};
use tokio::sync::mpsc::{
    unbounded_channel,
    UnboundedReceiver,
    UnboundedSender,
};

pub trait Publisher: Send + Sync + 'static {
    /// Hand over one event. An error means the event was not accepted.
    fn publish(&self, event: Event) -> Result<(), PublishError>;

    fn flush(&self) -> Result<(), PublishError> {
        Ok(())
    }
}

/// Writes events as JSON, one object per line unless `pretty` is set.
pub struct JsonLinesPublisher {
    writer: Mutex<Box<dyn Write + Send>>,
    pretty: bool,
}

impl std::fmt::Debug for JsonLinesPublisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonLinesPublisher")
            .field("pretty", &self.pretty)
            .finish_non_exhaustive()
    }
}

impl JsonLinesPublisher {
    pub fn new(writer: impl Write + Send + 'static, pretty: bool) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
            pretty,
        }
    }

    pub fn stdout(pretty: bool) -> Self {
        Self::new(io::stdout(), pretty)
    }

    /// Appends to `path`, creating the file if needed.
    pub fn file(path: impl AsRef<Path>, pretty: bool) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(BufWriter::new(file), pretty))
    }
}

impl Publisher for JsonLinesPublisher {
    fn publish(&self, event: Event) -> Result<(), PublishError> {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        if self.pretty {
            serde_json::to_writer_pretty(&mut *writer, &event)?;
        } else {
            serde_json::to_writer(&mut *writer, &event)?;
        }
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }

    fn flush(&self) -> Result<(), PublishError> {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writer.flush()?;
        Ok(())
    }
}

/// Forwards events to the receiver returned by [`ChannelPublisher::new`].
#[derive(Debug, Clone)]
pub struct ChannelPublisher {
    sender: UnboundedSender<Event>,
}

impl ChannelPublisher {
    pub fn new() -> (Self, UnboundedReceiver<Event>) {
        let (sender, receiver) = unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl Publisher for ChannelPublisher {
    fn publish(&self, event: Event) -> Result<(), PublishError> {
        self.sender.send(event).map_err(|_| PublishError::Closed)
    }
}
