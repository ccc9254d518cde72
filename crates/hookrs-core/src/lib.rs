// Hookrs Core Library
// Global keyboard and pointer bindings on top of a raw event stream

pub mod binding;
pub mod code;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod hook;
pub mod kind;
pub mod registry;
pub mod source;
pub mod state;
pub mod tables;

pub use binding::{canonical_button_name, is_pointer_name, resolve, BindingKey, Handler, HandlerRef};
pub use code::{Code, Combination, MAX_KEYS};
pub use config::{BindingEntry, Config, ConfigError, GeneralConfig, KindRepr, RegisterSummary};
pub use dispatch::{DispatchOutcome, Dispatcher};
pub use error::{BindingError, HookError, HookResult};
pub use event::{Payload, RawEvent, WheelDirection};
pub use hook::{Completion, EventStream, Hook, HookOptions, DEFAULT_QUEUE_CAPACITY};
pub use kind::{DeviceClass, EventKind};
pub use registry::Registry;
pub use source::{
    parse_event_line, EventSink, EventSource, LineParseError, LineSource, ManualSource, Poller,
    PollingSource, POLL_INTERVAL,
};
pub use state::{InputState, PressState, SpamFilter};
pub use tables::{CodeTable, StandardTable};
