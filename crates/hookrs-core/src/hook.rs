// Hookrs Hook
// Binding context and start/stop lifecycle

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender, TryRecvError};
use log::{debug, info, warn};
use parking_lot::{Mutex, RwLock};

use crate::binding::{resolve, HandlerRef};
use crate::code::Code;
use crate::dispatch::{DispatchOutcome, Dispatcher};
use crate::error::{BindingError, HookError, HookResult};
use crate::event::RawEvent;
use crate::kind::{DeviceClass, EventKind};
use crate::registry::Registry;
use crate::source::{EventSink, EventSource};
use crate::state::InputState;
use crate::tables::{CodeTable, StandardTable};

/// Default capacity of the event queue
pub const DEFAULT_QUEUE_CAPACITY: usize = 1024;

/// Tunables for a [`Hook`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HookOptions {
    /// Events the queue holds before producers block
    pub queue_capacity: usize,
}

impl Default for HookOptions {
    fn default() -> Self {
        Self {
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

/// Pieces that only exist between `start` and `stop`
struct Runtime {
    closed: Arc<AtomicBool>,
    shutdown: Sender<()>,
    events: Receiver<RawEvent>,
    source: Box<dyn EventSource>,
    worker: JoinHandle<()>,
}

/// Where a hook is in its start/stop cycle
enum Lifecycle {
    Idle,
    Running(Runtime),
    /// `stop` is tearing down; `start` is refused until the reset is done
    Stopping,
}

/// Input hook context.
///
/// Owns the binding registry and the press state. Bindings may be added at
/// any time, including from inside a handler while the hook is running.
/// Share it behind an `Arc` when handlers need to reach back into it.
pub struct Hook {
    registry: Arc<RwLock<Registry>>,
    state: Arc<Mutex<InputState>>,
    dispatcher: Dispatcher,
    table: Arc<dyn CodeTable>,
    options: HookOptions,
    lifecycle: Mutex<Lifecycle>,
}

impl Hook {
    /// Create a hook with the standard code table and default options
    pub fn new() -> Self {
        Self::with_options(HookOptions::default())
    }

    pub fn with_options(options: HookOptions) -> Self {
        Self::with_table(Arc::new(StandardTable::new()), options)
    }

    /// Create a hook resolving names through a custom table
    pub fn with_table(table: Arc<dyn CodeTable>, options: HookOptions) -> Self {
        let registry = Arc::new(RwLock::new(Registry::new()));
        let state = Arc::new(Mutex::new(InputState::new()));
        Self {
            dispatcher: Dispatcher::new(registry.clone(), state.clone()),
            registry,
            state,
            table,
            options,
            lifecycle: Mutex::new(Lifecycle::Idle),
        }
    }

    pub fn options(&self) -> HookOptions {
        self.options
    }

    /// Code table used for name resolution
    pub fn table(&self) -> &Arc<dyn CodeTable> {
        &self.table
    }

    /// Bind `handler` to `names` for events of `kind`.
    ///
    /// Binding again to the same (kind, names) replaces the handler.
    /// Unknown names are logged and reported as a non-fatal error; in every
    /// error case nothing is stored.
    pub fn register(
        &self,
        kind: EventKind,
        names: &[&str],
        handler: HandlerRef,
    ) -> Result<(), BindingError> {
        let key = match resolve(kind, names, self.table.as_ref()) {
            Ok(key) => key,
            Err(e) => {
                if !e.is_fatal() {
                    warn!("skipping binding {:?} for {}: {}", names, kind, e);
                }
                return Err(e);
            }
        };

        if self.registry.write().insert(kind, key, handler).is_some() {
            debug!("replaced handler for {} {}", kind, key);
        } else {
            debug!("registered {} {}", kind, key);
        }
        Ok(())
    }

    /// [`Hook::register`] for a plain closure
    pub fn register_fn<F>(&self, kind: EventKind, names: &[&str], f: F) -> Result<(), BindingError>
    where
        F: Fn(&RawEvent) + Send + Sync + 'static,
    {
        self.register(kind, names, Arc::new(f))
    }

    /// Number of stored bindings
    pub fn binding_count(&self) -> usize {
        self.registry.read().len()
    }

    /// Whether a handler is stored for (kind, names)
    pub fn is_bound(&self, kind: EventKind, names: &[&str]) -> bool {
        match resolve(kind, names, self.table.as_ref()) {
            Ok(key) => self.registry.read().lookup(kind, &key).is_some(),
            Err(_) => false,
        }
    }

    /// Run one event through dispatch on the calling thread
    pub fn process_event(&self, event: &RawEvent) -> DispatchOutcome {
        self.dispatcher.dispatch(event)
    }

    /// Current press bit of a code
    pub fn is_pressed(&self, class: DeviceClass, code: Code) -> bool {
        self.state.lock().press(class).get(code)
    }

    /// Whether the dispatch thread is alive
    pub fn is_running(&self) -> bool {
        match &*self.lifecycle.lock() {
            Lifecycle::Running(rt) => !rt.worker.is_finished(),
            _ => false,
        }
    }

    /// Start dispatching events produced by `source`.
    ///
    /// Returns immediately. Fails with [`HookError::AlreadyRunning`] until
    /// `stop` has finished for the previous start.
    pub fn start<S>(&self, source: S) -> HookResult<EventStream>
    where
        S: EventSource + 'static,
    {
        let mut lifecycle = self.lifecycle.lock();
        if !matches!(*lifecycle, Lifecycle::Idle) {
            return Err(HookError::AlreadyRunning);
        }

        let capacity = self.options.queue_capacity.max(1);
        let (tx, rx) = bounded(capacity);
        let (shutdown_tx, shutdown_rx) = bounded::<()>(0);
        let (done_tx, done_rx) = bounded::<()>(1);
        let closed = Arc::new(AtomicBool::new(false));

        let dispatcher = self.dispatcher.clone();
        let events = rx.clone();
        let flag = closed.clone();
        let worker = thread::Builder::new()
            .name("hookrs-dispatch".to_string())
            .spawn(move || {
                let processed = dispatcher.run(&events, &shutdown_rx, &flag);
                debug!("dispatch loop finished after {} event(s)", processed);
                let _ = done_tx.send(());
            })
            .map_err(HookError::Spawn)?;

        let sink = EventSink::new(tx, closed.clone());
        let mut source: Box<dyn EventSource> = Box::new(source);
        if let Err(e) = source.start(sink.clone()) {
            closed.store(true, Ordering::SeqCst);
            drop(shutdown_tx);
            if worker.join().is_err() {
                warn!("dispatch thread panicked");
            }
            return Err(match e {
                HookError::Source(msg) => HookError::Source(msg),
                other => HookError::Source(other.to_string()),
            });
        }

        *lifecycle = Lifecycle::Running(Runtime {
            closed,
            shutdown: shutdown_tx,
            events: rx,
            source,
            worker,
        });
        info!("hook started (queue capacity {})", capacity);

        Ok(EventStream {
            sink,
            completion: Completion { rx: done_rx },
        })
    }

    /// Stop dispatching and return to the empty state.
    ///
    /// Queued events that were not dispatched yet are discarded. Bindings,
    /// press state and the spam cache are cleared even when the hook was
    /// not running. May be called from a handler. `start` is refused until
    /// the reset has happened.
    pub fn stop(&self) {
        let runtime = {
            let mut lifecycle = self.lifecycle.lock();
            match std::mem::replace(&mut *lifecycle, Lifecycle::Stopping) {
                Lifecycle::Running(rt) => Some(rt),
                Lifecycle::Idle => None,
                // Another stop owns the teardown and the reset
                Lifecycle::Stopping => return,
            }
        };

        // Lifecycle lock is released while joining; the dispatch thread may
        // still call into the hook
        if let Some(Runtime {
            closed,
            shutdown,
            events,
            mut source,
            worker,
        }) = runtime
        {
            // Closed first so producers blocked on a full queue give up
            closed.store(true, Ordering::SeqCst);
            source.stop();
            drop(shutdown);

            if worker.thread().id() == thread::current().id() {
                debug!("stop called from the dispatch thread");
            } else if worker.join().is_err() {
                warn!("dispatch thread panicked");
            }

            let discarded = events.try_iter().count();
            if discarded > 0 {
                info!("discarded {} queued event(s)", discarded);
            }
            info!("hook stopped");
        }

        self.registry.write().clear();
        self.state.lock().reset();
        *self.lifecycle.lock() = Lifecycle::Idle;
    }
}

impl Default for Hook {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Hook {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Handle returned by [`Hook::start`]
#[derive(Debug, Clone)]
pub struct EventStream {
    sink: EventSink,
    completion: Completion,
}

impl EventStream {
    /// Inject an event, waiting while the queue is full
    pub fn send(&self, event: RawEvent) -> HookResult<()> {
        self.sink.send(event)
    }

    /// Producer handle that can be moved to another thread
    pub fn sink(&self) -> EventSink {
        self.sink.clone()
    }

    pub fn completion(&self) -> &Completion {
        &self.completion
    }

    /// Drop the producer side and keep only the completion signal.
    ///
    /// Once the source also lets go of its sink the queue disconnects and
    /// the dispatch loop ends on its own.
    pub fn into_completion(self) -> Completion {
        self.completion
    }
}

/// Fires once the dispatch loop has finished
#[derive(Debug, Clone)]
pub struct Completion {
    rx: Receiver<()>,
}

impl Completion {
    /// Block until the loop has finished
    pub fn wait(&self) {
        let _ = self.rx.recv();
    }

    /// Block for at most `timeout`; returns whether the loop finished
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        !matches!(self.rx.recv_timeout(timeout), Err(RecvTimeoutError::Timeout))
    }

    pub fn is_complete(&self) -> bool {
        !matches!(self.rx.try_recv(), Err(TryRecvError::Empty))
    }
}
