// Hookrs Config
// TOML binding files

pub mod parser;

pub use parser::{BindingEntry, Config, ConfigError, GeneralConfig, KindRepr, RegisterSummary};
