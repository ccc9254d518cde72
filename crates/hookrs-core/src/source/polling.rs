// Hookrs Polling Source
// Fixed-interval polling of a native event producer

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{debug, info, warn};

use super::{EventSink, EventSource};
use crate::error::{HookError, HookResult};
use crate::event::RawEvent;
use crate::kind::EventKind;

/// Interval between two polls of the native producer
pub const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Native producer polled by [`PollingSource`].
///
/// `poll` returns whatever events became available since the last call,
/// oldest first, and must not block for long.
pub trait Poller: Send + 'static {
    fn poll(&mut self) -> Vec<RawEvent>;
}

impl<F> Poller for F
where
    F: FnMut() -> Vec<RawEvent> + Send + 'static,
{
    fn poll(&mut self) -> Vec<RawEvent> {
        self()
    }
}

/// Event source that runs a [`Poller`] on its own thread.
///
/// Emits `HookEnabled` once polling starts and, if the queue still has
/// room, `HookDisabled` when it stops.
pub struct PollingSource<P: Poller> {
    poller: Option<P>,
    running: Arc<AtomicBool>,
    worker: Option<JoinHandle<P>>,
}

impl<P: Poller> PollingSource<P> {
    pub fn new(poller: P) -> Self {
        Self {
            poller: Some(poller),
            running: Arc::new(AtomicBool::new(false)),
            worker: None,
        }
    }

    /// Whether the polling thread is active
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    fn poll_loop(mut poller: P, sink: EventSink, running: Arc<AtomicBool>) -> P {
        if sink.send(RawEvent::bare(EventKind::HookEnabled)).is_err() {
            running.store(false, Ordering::SeqCst);
        }

        'outer: while running.load(Ordering::SeqCst) {
            for event in poller.poll() {
                if sink.send(event).is_err() {
                    debug!("event queue closed, polling stops");
                    break 'outer;
                }
            }
            thread::sleep(POLL_INTERVAL);
        }
        running.store(false, Ordering::SeqCst);

        let _ = sink.try_send(RawEvent::bare(EventKind::HookDisabled));
        poller
    }
}

impl<P: Poller> EventSource for PollingSource<P> {
    fn start(&mut self, sink: EventSink) -> HookResult<()> {
        let poller = self
            .poller
            .take()
            .ok_or_else(|| HookError::Source("polling source is already running".to_string()))?;

        self.running.store(true, Ordering::SeqCst);
        let running = self.running.clone();
        let worker = thread::Builder::new()
            .name("hookrs-poll".to_string())
            .spawn(move || Self::poll_loop(poller, sink, running))
            .map_err(HookError::Spawn)?;

        self.worker = Some(worker);
        info!("polling source started ({:?} interval)", POLL_INTERVAL);
        Ok(())
    }

    fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(worker) = self.worker.take() {
            match worker.join() {
                Ok(poller) => self.poller = Some(poller),
                Err(_) => warn!("polling thread panicked"),
            }
        }
    }
}

impl<P: Poller> Drop for PollingSource<P> {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::time::Instant;

    fn scripted(batches: Vec<Vec<RawEvent>>) -> impl Poller {
        let mut batches: VecDeque<Vec<RawEvent>> = batches.into();
        move || batches.pop_front().unwrap_or_default()
    }

    fn collect(rx: &crossbeam_channel::Receiver<RawEvent>, n: usize) -> Vec<RawEvent> {
        let deadline = Instant::now() + Duration::from_secs(2);
        let mut out = Vec::new();
        while out.len() < n && Instant::now() < deadline {
            if let Ok(ev) = rx.recv_timeout(Duration::from_millis(100)) {
                out.push(ev);
            }
        }
        out
    }

    #[test]
    fn test_forwards_batches_in_order() {
        let (tx, rx) = crossbeam_channel::bounded(64);
        let closed = Arc::new(AtomicBool::new(false));
        let mut source = PollingSource::new(scripted(vec![
            vec![
                RawEvent::key(EventKind::KeyDown, 1),
                RawEvent::key(EventKind::KeyDown, 2),
            ],
            vec![],
            vec![RawEvent::key(EventKind::KeyUp, 1)],
        ]));

        source.start(EventSink::new(tx, closed)).unwrap();
        let events = collect(&rx, 4);
        source.stop();

        let kinds: Vec<(EventKind, Option<u16>)> = events
            .iter()
            .map(|e| (e.kind, e.code().map(u16::from)))
            .collect();
        assert_eq!(
            kinds,
            vec![
                (EventKind::HookEnabled, None),
                (EventKind::KeyDown, Some(1)),
                (EventKind::KeyDown, Some(2)),
                (EventKind::KeyUp, Some(1)),
            ]
        );
        assert!(!source.is_running());
    }

    #[test]
    fn test_stop_emits_hook_disabled_and_allows_restart() {
        let (tx, rx) = crossbeam_channel::bounded(64);
        let closed = Arc::new(AtomicBool::new(false));
        let mut source = PollingSource::new(scripted(vec![]));

        source.start(EventSink::new(tx.clone(), closed.clone())).unwrap();
        assert!(matches!(
            source.start(EventSink::new(tx.clone(), closed.clone())),
            Err(HookError::Source(_))
        ));
        source.stop();

        let kinds: Vec<EventKind> = rx.try_iter().map(|e| e.kind).collect();
        assert_eq!(kinds.first(), Some(&EventKind::HookEnabled));
        assert_eq!(kinds.last(), Some(&EventKind::HookDisabled));

        // The poller came back from the thread
        source.start(EventSink::new(tx, closed)).unwrap();
        source.stop();
    }

    #[test]
    fn test_closed_queue_ends_polling() {
        let (tx, _rx) = crossbeam_channel::bounded(64);
        let closed = Arc::new(AtomicBool::new(true));
        let mut source = PollingSource::new(scripted(vec![vec![RawEvent::key(
            EventKind::KeyDown,
            1,
        )]]));

        source.start(EventSink::new(tx, closed)).unwrap();
        std::thread::sleep(Duration::from_millis(30));
        assert!(!source.is_running());
        source.stop();
    }
}
