// Hookrs Dispatch Loop
// Turns raw events into press-state updates and handler calls

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crossbeam_channel::{select, Receiver};
use log::{debug, trace};
use parking_lot::{Mutex, RwLock};
use smallvec::SmallVec;

use crate::binding::HandlerRef;
use crate::event::RawEvent;
use crate::kind::{DeviceClass, EventKind};
use crate::registry::Registry;
use crate::state::InputState;

/// What the dispatcher did with a single event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Kind does not take part in dispatch (movement, wheel, lifecycle, ...)
    Ignored,
    /// Same kind and code as the previous event of its class
    Duplicate,
    /// Pointer event with no binding for its (kind, button)
    Unbound,
    /// State updated, no binding matched
    NoMatch,
    /// This many handlers were invoked
    Fired(usize),
}

/// Matches events against the registry.
///
/// Cloning is cheap; clones share the registry and the state.
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<RwLock<Registry>>,
    state: Arc<Mutex<InputState>>,
}

impl Dispatcher {
    pub fn new(registry: Arc<RwLock<Registry>>, state: Arc<Mutex<InputState>>) -> Self {
        Self { registry, state }
    }

    /// Process one event: filter, update state, match and invoke handlers.
    ///
    /// Handlers are collected while the locks are held and invoked after
    /// they are released, so a handler may register bindings or stop the
    /// hook.
    pub fn dispatch(&self, event: &RawEvent) -> DispatchOutcome {
        let (Some(class), Some(code)) = (event.device_class(), event.code()) else {
            trace!("observed {}", event);
            return DispatchOutcome::Ignored;
        };

        let handlers: SmallVec<[HandlerRef; 4]> = {
            let mut state = self.state.lock();
            if state.spam.is_duplicate(event) {
                trace!("dropping repeated {}", event);
                return DispatchOutcome::Duplicate;
            }
            state.spam.accept(event);

            match class {
                DeviceClass::Keyboard => {
                    state.apply(event.kind, code);
                    debug!("setting pressed[{}] = {}", code, event.kind.is_press());

                    let registry = self.registry.read();
                    let matched: SmallVec<[HandlerRef; 4]> = registry
                        .combinations(event.kind)
                        .filter(|(combo, _)| {
                            let matched = match event.kind {
                                EventKind::KeyDown => state.keys.all_pressed(combo),
                                _ => state.keys.all_unpressed(combo),
                            };
                            debug!("checking {} for {}: {}", combo, event.kind, matched);
                            matched
                        })
                        .map(|(_, handler)| handler.clone())
                        .collect();
                    matched
                }
                DeviceClass::Pointer => {
                    let registry = self.registry.read();
                    let Some(handler) = registry.button(event.kind, code) else {
                        debug!("no binding for button {} on {}", code, event.kind);
                        return DispatchOutcome::Unbound;
                    };

                    state.apply(event.kind, code);
                    let pressed = state.buttons.get(code);
                    debug!("setting button_pressed[{}] = {}", code, pressed);

                    let fire = match event.kind {
                        EventKind::ButtonDown => pressed,
                        _ => !pressed,
                    };
                    if fire {
                        SmallVec::from_elem(handler.clone(), 1)
                    } else {
                        SmallVec::new()
                    }
                }
            }
        };

        if handlers.is_empty() {
            return DispatchOutcome::NoMatch;
        }

        debug!("calling {} handler(s) for {}", handlers.len(), event);
        for handler in &handlers {
            handler.handle(event);
        }
        DispatchOutcome::Fired(handlers.len())
    }

    /// Drain `events` until the queue disconnects, `shutdown` fires or
    /// `closed` is set. Returns the number of events taken off the queue.
    pub(crate) fn run(
        &self,
        events: &Receiver<RawEvent>,
        shutdown: &Receiver<()>,
        closed: &AtomicBool,
    ) -> usize {
        let mut processed = 0;
        loop {
            let next = select! {
                recv(events) -> msg => msg.ok(),
                recv(shutdown) -> _ => None,
            };
            let Some(event) = next else {
                break;
            };
            if closed.load(Ordering::SeqCst) {
                break;
            }

            let outcome = self.dispatch(&event);
            trace!("{} -> {:?}", event, outcome);
            processed += 1;
        }
        processed
    }
}
