// Hookrs Binding Registry
// Per-kind tables mapping combinations and buttons to handlers

use indexmap::IndexMap;

use crate::binding::{BindingKey, HandlerRef};
use crate::code::{Code, Combination};
use crate::kind::EventKind;

/// Binding tables for keyboard combinations and pointer buttons.
///
/// At most one handler is stored per (kind, key); inserting again replaces
/// the previous handler. Iteration follows insertion order.
#[derive(Default)]
pub struct Registry {
    keys: IndexMap<EventKind, IndexMap<Combination, HandlerRef>>,
    buttons: IndexMap<EventKind, IndexMap<Code, HandlerRef>>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a handler, returning the one it replaced
    pub fn insert(
        &mut self,
        kind: EventKind,
        key: BindingKey,
        handler: HandlerRef,
    ) -> Option<HandlerRef> {
        match key {
            BindingKey::Keys(combo) => self.keys.entry(kind).or_default().insert(combo, handler),
            BindingKey::Button(code) => {
                self.buttons.entry(kind).or_default().insert(code, handler)
            }
        }
    }

    /// Look up the handler bound to (kind, key)
    pub fn lookup(&self, kind: EventKind, key: &BindingKey) -> Option<HandlerRef> {
        match key {
            BindingKey::Keys(combo) => self.keys.get(&kind)?.get(combo).cloned(),
            BindingKey::Button(code) => self.button(kind, *code).cloned(),
        }
    }

    /// Handler bound to a single pointer button
    pub fn button(&self, kind: EventKind, code: Code) -> Option<&HandlerRef> {
        self.buttons.get(&kind)?.get(&code)
    }

    /// All keyboard combinations bound for `kind`
    pub fn combinations(
        &self,
        kind: EventKind,
    ) -> impl Iterator<Item = (&Combination, &HandlerRef)> + '_ {
        self.keys.get(&kind).into_iter().flat_map(|table| table.iter())
    }

    /// Total number of bindings across both tables
    pub fn len(&self) -> usize {
        let keys: usize = self.keys.values().map(IndexMap::len).sum();
        let buttons: usize = self.buttons.values().map(IndexMap::len).sum();
        keys + buttons
    }

    /// Check if no bindings are stored
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every binding
    pub fn clear(&mut self) {
        self.keys.clear();
        self.buttons.clear();
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let keys: Vec<(EventKind, Vec<&Combination>)> = self
            .keys
            .iter()
            .map(|(kind, table)| (*kind, table.keys().collect()))
            .collect();
        let buttons: Vec<(EventKind, Vec<&Code>)> = self
            .buttons
            .iter()
            .map(|(kind, table)| (*kind, table.keys().collect()))
            .collect();
        f.debug_struct("Registry")
            .field("keys", &keys)
            .field("buttons", &buttons)
            .finish()
    }
}
