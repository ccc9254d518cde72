// Hookrs Event Sources
// Producer side of the event queue

mod line;
mod polling;

pub use line::{parse_event_line, LineParseError, LineSource};
pub use polling::{Poller, PollingSource, POLL_INTERVAL};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{SendTimeoutError, Sender, TrySendError};

use crate::error::{HookError, HookResult};
use crate::event::RawEvent;

/// How long a blocked send waits before re-checking the closed flag
const SEND_RECHECK: Duration = Duration::from_millis(50);

/// Producer handle onto the bounded event queue.
///
/// `send` blocks while the queue is full rather than dropping events, and
/// fails with [`HookError::Closed`] once the hook has been stopped.
#[derive(Debug, Clone)]
pub struct EventSink {
    sender: Sender<RawEvent>,
    closed: Arc<AtomicBool>,
}

impl EventSink {
    pub(crate) fn new(sender: Sender<RawEvent>, closed: Arc<AtomicBool>) -> Self {
        Self { sender, closed }
    }

    /// Enqueue an event, waiting for room if the queue is full
    pub fn send(&self, event: RawEvent) -> HookResult<()> {
        let mut event = event;
        loop {
            if self.is_closed() {
                return Err(HookError::Closed);
            }
            match self.sender.send_timeout(event, SEND_RECHECK) {
                Ok(()) => return Ok(()),
                Err(SendTimeoutError::Timeout(back)) => event = back,
                Err(SendTimeoutError::Disconnected(_)) => return Err(HookError::Closed),
            }
        }
    }

    /// Enqueue an event without waiting; `Ok(false)` means the queue is full
    pub fn try_send(&self, event: RawEvent) -> HookResult<bool> {
        if self.is_closed() {
            return Err(HookError::Closed);
        }
        match self.sender.try_send(event) {
            Ok(()) => Ok(true),
            Err(TrySendError::Full(_)) => Ok(false),
            Err(TrySendError::Disconnected(_)) => Err(HookError::Closed),
        }
    }

    /// Whether the hook has stopped accepting events
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Number of events waiting in the queue
    pub fn queued(&self) -> usize {
        self.sender.len()
    }
}

/// Producer of raw events, typically wrapping a native hook.
///
/// `start` is handed the sink and must return without blocking; `stop`
/// must make the producer stop emitting.
pub trait EventSource: Send {
    fn start(&mut self, sink: EventSink) -> HookResult<()>;

    fn stop(&mut self);
}

/// Source that produces nothing on its own.
///
/// Events are injected through [`crate::EventStream::send`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualSource;

impl EventSource for ManualSource {
    fn start(&mut self, _sink: EventSink) -> HookResult<()> {
        Ok(())
    }

    fn stop(&mut self) {}
}
