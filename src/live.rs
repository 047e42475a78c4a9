//! Push subscription for newly created clips.
//!
//! A channel starts `Connected` and moves to `Disconnected` exactly once: when
//! the transport closes or fails, or on explicit teardown. It never
//! reconnects; the owner opens a new channel instead.

use std::io::{BufRead, ErrorKind};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use parking_lot::Mutex;

use crate::error::TransportError;
use crate::model::RawClip;
use crate::remote::RemoteClient;

// How often a blocked `recv` re-checks for teardown.
const TEARDOWN_POLL: Duration = Duration::from_millis(100);

/// Opens the underlying push transport.
pub trait LiveSource: Send + Sync {
    fn open(&self) -> Result<Box<dyn BufRead + Send>, TransportError>;
}

impl LiveSource for RemoteClient {
    fn open(&self) -> Result<Box<dyn BufRead + Send>, TransportError> {
        self.open_event_stream()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelState {
    Connected,
    Disconnected,
}

#[derive(Debug)]
struct Shared {
    connected: AtomicBool,
    stop: AtomicBool,
    reason: Mutex<Option<TransportError>>,
}

impl Shared {
    fn state(&self) -> ChannelState {
        if self.connected.load(Ordering::Acquire) && !self.stop.load(Ordering::Acquire) {
            ChannelState::Connected
        } else {
            ChannelState::Disconnected
        }
    }

    fn teardown(&self) {
        if !self.stop.swap(true, Ordering::AcqRel) {
            tracing::debug!("live clip channel torn down");
        }
    }
}

/// Cloneable handle that can observe or tear down a channel owned elsewhere.
#[derive(Clone, Debug)]
pub struct LiveTeardown {
    shared: Arc<Shared>,
}

impl LiveTeardown {
    pub fn state(&self) -> ChannelState {
        self.shared.state()
    }

    pub fn disconnect(&self) {
        self.shared.teardown();
    }
}

/// Lazy, unbounded, non-restartable sequence of live clip records.
///
/// Records are delivered in the order the remote store pushed them, at most
/// once each. No de-duplication happens here.
pub struct LiveEventChannel {
    shared: Arc<Shared>,
    rx: mpsc::Receiver<RawClip>,
}

impl LiveEventChannel {
    pub fn connect(source: &dyn LiveSource) -> Result<Self, TransportError> {
        let reader = source.open()?;
        let channel = Self::from_reader(reader)?;
        tracing::info!("live clip channel connected");
        Ok(channel)
    }

    /// Wraps an already-open newline-delimited JSON stream.
    pub fn from_reader(reader: Box<dyn BufRead + Send>) -> Result<Self, TransportError> {
        let shared = Arc::new(Shared {
            connected: AtomicBool::new(true),
            stop: AtomicBool::new(false),
            reason: Mutex::new(None),
        });
        let (tx, rx) = mpsc::channel();

        let pump_shared = shared.clone();
        thread::Builder::new()
            .name("clipwatch-live".to_string())
            .spawn(move || pump(reader, tx, &pump_shared))
            .map_err(|err| TransportError::request("start live reader", err))?;

        Ok(Self { shared, rx })
    }

    pub fn state(&self) -> ChannelState {
        self.shared.state()
    }

    /// Why the transport closed, when it closed with an error.
    pub fn close_reason(&self) -> Option<TransportError> {
        self.shared.reason.lock().clone()
    }

    pub fn teardown_handle(&self) -> LiveTeardown {
        LiveTeardown {
            shared: self.shared.clone(),
        }
    }

    /// Blocks for the next record; `None` once the channel is disconnected and
    /// everything the transport delivered before closing has been drained.
    pub fn recv(&self) -> Option<RawClip> {
        loop {
            if self.shared.stop.load(Ordering::Acquire) {
                return None;
            }
            match self.rx.recv_timeout(TEARDOWN_POLL) {
                Ok(raw) => return Some(raw),
                Err(mpsc::RecvTimeoutError::Timeout) => continue,
                Err(mpsc::RecvTimeoutError::Disconnected) => return None,
            }
        }
    }

    /// Waits at most `timeout`. `Err(())` means nothing arrived in time and the
    /// channel is still connected.
    #[allow(clippy::result_unit_err)]
    pub fn recv_timeout(&self, timeout: Duration) -> Result<Option<RawClip>, ()> {
        if self.shared.stop.load(Ordering::Acquire) {
            return Ok(None);
        }
        match self.rx.recv_timeout(timeout) {
            Ok(raw) => Ok(Some(raw)),
            Err(mpsc::RecvTimeoutError::Timeout) => Err(()),
            Err(mpsc::RecvTimeoutError::Disconnected) => Ok(None),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = RawClip> + '_ {
        std::iter::from_fn(move || self.recv())
    }

    /// Explicit teardown. The reader thread releases the transport at its next
    /// line or heartbeat.
    pub fn disconnect(&self) {
        self.shared.teardown();
    }
}

impl Drop for LiveEventChannel {
    fn drop(&mut self) {
        self.shared.teardown();
    }
}

fn pump(mut reader: Box<dyn BufRead + Send>, tx: mpsc::Sender<RawClip>, shared: &Shared) {
    let mut line = Vec::new();
    loop {
        if shared.stop.load(Ordering::Acquire) {
            break;
        }
        line.clear();
        match reader.read_until(b'\n', &mut line) {
            Ok(0) => break,
            Ok(_) => {
                if shared.stop.load(Ordering::Acquire) {
                    break;
                }
                let record = line.trim_ascii();
                // Blank lines are heartbeats.
                if record.is_empty() {
                    continue;
                }
                if tx.send(RawClip::from_json(record)).is_err() {
                    break;
                }
            }
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => {
                tracing::warn!(error = %err, "live clip stream failed");
                *shared.reason.lock() = Some(TransportError::request("read clip events", err));
                break;
            }
        }
    }
    shared.connected.store(false, Ordering::Release);
    tracing::info!("live clip channel disconnected");
}

#[cfg(test)]
#[path = "tests/live_tests.rs"]
mod tests;
