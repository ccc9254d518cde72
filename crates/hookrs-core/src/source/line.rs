// Hookrs Line Source
// Text event stream, one event per line

use std::io::BufRead;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use log::{debug, warn};

use super::{EventSink, EventSource};
use crate::binding::canonical_button_name;
use crate::code::Code;
use crate::error::{HookError, HookResult};
use crate::event::{Payload, RawEvent, WheelDirection};
use crate::kind::{DeviceClass, EventKind};
use crate::tables::CodeTable;

/// Errors from [`parse_event_line`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LineParseError {
    #[error("unknown event kind: '{0}'")]
    UnknownKind(String),

    #[error("{0} events need a key or button name")]
    MissingName(EventKind),

    #[error("unknown {class} name: '{name}'")]
    UnknownName { name: String, class: DeviceClass },

    #[error("invalid number: '{0}'")]
    InvalidNumber(String),
}

fn number<T: std::str::FromStr>(s: &str) -> Result<T, LineParseError> {
    s.parse()
        .map_err(|_| LineParseError::InvalidNumber(s.to_string()))
}

/// Table names win over raw numbers so digit keys ("5") keep their key code
fn code_of(table: &dyn CodeTable, class: DeviceClass, name: &str) -> Result<Code, LineParseError> {
    let lookup = match class {
        DeviceClass::Keyboard => name.to_string(),
        DeviceClass::Pointer => canonical_button_name(&name.to_ascii_lowercase()).to_string(),
    };
    if let Some(code) = table.code(class, &lookup) {
        return Ok(code);
    }
    name.parse::<u16>()
        .map(Code)
        .map_err(|_| LineParseError::UnknownName {
            name: name.to_string(),
            class,
        })
}

/// Parse one line of the text event format.
///
/// ```text
/// key_down ctrl          # keyboard events take a key name or raw code
/// 4 a                    # kinds may be given by number
/// button_down left 10 20 # pointer events take a button and optional x y
/// move 100 200
/// wheel -1               # wheel rotation, vertical
/// hook_enabled
/// ```
///
/// Blank lines and `#` comments yield `Ok(None)`.
pub fn parse_event_line(
    line: &str,
    table: &dyn CodeTable,
) -> Result<Option<RawEvent>, LineParseError> {
    let line = line.split('#').next().unwrap_or("").trim();
    if line.is_empty() {
        return Ok(None);
    }

    let mut parts = line.split_whitespace();
    let kind_str = parts.next().unwrap_or_default();
    let kind =
        EventKind::parse(kind_str).ok_or_else(|| LineParseError::UnknownKind(kind_str.to_string()))?;
    let args: Vec<&str> = parts.collect();

    let event = match kind {
        EventKind::KeyDown | EventKind::KeyUp | EventKind::KeyHold => {
            let name = args.first().ok_or(LineParseError::MissingName(kind))?;
            let code = code_of(table, DeviceClass::Keyboard, name)?;
            RawEvent::key(kind, code.value())
        }
        EventKind::ButtonDown | EventKind::ButtonUp | EventKind::ButtonHold => {
            let name = args.first().ok_or(LineParseError::MissingName(kind))?;
            let code = code_of(table, DeviceClass::Pointer, name)?;
            let mut event = RawEvent::button(kind, code.value());
            if let [_, x, y, ..] = args.as_slice() {
                event = event.with_position(number(x)?, number(y)?);
            }
            event
        }
        EventKind::Move | EventKind::Drag => {
            let (x, y) = match args.as_slice() {
                [x, y, ..] => (number(x)?, number(y)?),
                _ => (0, 0),
            };
            RawEvent::new(
                kind,
                Payload::Button {
                    button: Code::NONE,
                    clicks: 0,
                    x,
                    y,
                },
            )
        }
        EventKind::Wheel => {
            let rotation = match args.first() {
                Some(r) => number(r)?,
                None => 1,
            };
            RawEvent::wheel(1, rotation, WheelDirection::Vertical)
        }
        EventKind::Synthetic | EventKind::HookEnabled | EventKind::HookDisabled => {
            RawEvent::bare(kind)
        }
    };

    Ok(Some(event))
}

/// Event source reading the text format from any buffered reader.
///
/// Malformed lines are logged and skipped. The reader thread ends at end
/// of input or, after `stop`, at the next line it reads; it is not joined
/// since a reader such as stdin may block indefinitely.
pub struct LineSource<R> {
    reader: Option<R>,
    table: Arc<dyn CodeTable>,
    running: Arc<AtomicBool>,
}

impl<R: BufRead + Send + 'static> LineSource<R> {
    pub fn new(reader: R, table: Arc<dyn CodeTable>) -> Self {
        Self {
            reader: Some(reader),
            table,
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    fn read_loop(reader: R, table: Arc<dyn CodeTable>, sink: EventSink, running: Arc<AtomicBool>) {
        for (lineno, line) in reader.lines().enumerate() {
            if !running.load(Ordering::SeqCst) {
                break;
            }
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    warn!("stopped reading events: {}", e);
                    break;
                }
            };
            match parse_event_line(&line, table.as_ref()) {
                Ok(Some(event)) => {
                    if sink.send(event).is_err() {
                        break;
                    }
                }
                Ok(None) => {}
                Err(e) => warn!("line {}: {}, skipping", lineno + 1, e),
            }
        }
        debug!("line source finished");
        running.store(false, Ordering::SeqCst);
    }
}

impl<R: BufRead + Send + 'static> EventSource for LineSource<R> {
    fn start(&mut self, sink: EventSink) -> HookResult<()> {
        let reader = self
            .reader
            .take()
            .ok_or_else(|| HookError::Source("line source can only be started once".to_string()))?;

        self.running.store(true, Ordering::SeqCst);
        let running = self.running.clone();
        let table = self.table.clone();
        thread::Builder::new()
            .name("hookrs-lines".to_string())
            .spawn(move || Self::read_loop(reader, table, sink, running))
            .map_err(HookError::Spawn)?;
        Ok(())
    }

    fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
    }
}
