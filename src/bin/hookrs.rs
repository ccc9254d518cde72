// Hookrs CLI
// Prints fired bindings for events read from stdin

use std::io::BufReader;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use log::{info, warn};

use hookrs_core::{
    is_pointer_name, BindingEntry, CodeTable, Config, DeviceClass, EventKind, HandlerRef, Hook,
    LineSource, RawEvent, StandardTable,
};

/// Global keyboard and mouse bindings
#[derive(Parser, Debug)]
#[command(name = "hookrs")]
#[command(version)]
#[command(about = "Global keyboard and mouse bindings over a text event stream", long_about = None)]
struct Args {
    /// TOML binding file (default: ~/.config/hookrs/bindings.toml)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Binding to add: comma-separated keys ("ctrl,a") or a pointer name ("mleft")
    #[arg(short, long, value_name = "BIND")]
    bind: Vec<String>,

    /// Event kind for the matching --bind, numeric ("4") or by name ("key_down")
    #[arg(short, long, value_name = "KIND")]
    kind: Vec<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Validate bindings and exit
    #[arg(long)]
    check_config: bool,

    /// List known key and button names
    #[arg(long)]
    list_keys: bool,
}

fn init_logging(verbose: bool, config_level: Option<&str>) {
    let default = config_level.unwrap_or("info");
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

/// Pair up `--bind` and `--kind` values.
///
/// Pointer names (`mleft`, `wheel_up`, ...) become single-button bindings;
/// anything else is a comma-separated key list.
fn cli_bindings(binds: &[String], kinds: &[String]) -> Result<Vec<BindingEntry>> {
    if binds.len() != kinds.len() {
        bail!(
            "got {} --bind and {} --kind values, they must pair up",
            binds.len(),
            kinds.len()
        );
    }

    binds
        .iter()
        .zip(kinds)
        .map(|(bind, kind)| {
            let kind = EventKind::parse(kind).ok_or_else(|| anyhow!("unknown event kind '{}'", kind))?;
            let keys: Vec<String> = if is_pointer_name(bind) {
                // Pointer binds are a single button and need a button kind
                if !kind.is_button() {
                    bail!("pointer bind '{}' needs a button kind, got {}", bind, kind);
                }
                vec![bind.trim().to_string()]
            } else {
                bind.split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(str::to_string)
                    .collect()
            };
            Ok(BindingEntry {
                kind,
                keys,
                label: Some(bind.clone()),
            })
        })
        .collect()
}

/// Handler printing `<kind-number>:<bind>` for every firing
fn printer(entry: &BindingEntry) -> HandlerRef {
    let line = format!("{}:{}", entry.kind.to_u8(), entry.display_name());
    Arc::new(move |_: &RawEvent| println!("{}", line))
}

fn load_config(args: &Args) -> Result<Config> {
    match &args.config {
        Some(path) => Config::from_toml_path(path)
            .with_context(|| format!("failed to load {}", path.display())),
        None => Config::load_default().context("failed to load default config"),
    }
}

fn list_keys() {
    let table = StandardTable::new();
    println!("Keyboard:");
    for name in table.names(DeviceClass::Keyboard) {
        if let Some(code) = table.code(DeviceClass::Keyboard, name) {
            println!("  {:<16} {}", name, code);
        }
    }
    println!("Pointer:");
    for name in table.names(DeviceClass::Pointer) {
        if let Some(code) = table.code(DeviceClass::Pointer, name) {
            println!("  {:<16} {}", name, code);
        }
    }
}

/// Register config and command-line bindings, returning how many were stored
fn register(hook: &Hook, config: &Config, extra: &Config) -> Result<usize> {
    let from_file = config.register_all(hook, printer)?;
    let from_args = extra.register_all(hook, printer)?;
    Ok(from_file.registered + from_args.registered)
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.list_keys {
        list_keys();
        return Ok(());
    }

    let config = load_config(&args)?;
    init_logging(args.verbose, config.log_level());

    let extra = Config::from_entries(cli_bindings(&args.bind, &args.kind)?);
    let hook = Arc::new(Hook::with_options(config.options()));
    let registered = register(&hook, &config, &extra)?;

    if args.check_config {
        println!("Configuration is valid ({} binding(s))", registered);
        return Ok(());
    }
    if registered == 0 {
        warn!("no bindings registered, nothing will be printed");
    }

    let source = LineSource::new(BufReader::new(std::io::stdin()), hook.table().clone());
    let stream = hook.start(source)?;
    info!("reading events from stdin");

    // Set up signal handler for graceful shutdown
    {
        use signal_hook::consts::{SIGINT, SIGTERM};
        use signal_hook::iterator::Signals;

        let mut signals = Signals::new([SIGINT, SIGTERM]).context("failed to install signal handler")?;
        let hook = hook.clone();
        std::thread::spawn(move || {
            if signals.forever().next().is_some() {
                info!("received signal, shutting down");
                hook.stop();
            }
        });
    }

    // Ends at end of input or when a signal stops the hook
    stream.into_completion().wait();
    hook.stop();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parsing() {
        let args = Args::parse_from(["hookrs", "--config", "/tmp/bindings.toml"]);

        assert_eq!(args.config, Some(PathBuf::from("/tmp/bindings.toml")));
        assert!(args.bind.is_empty());
        assert!(args.kind.is_empty());
        assert!(!args.verbose);
        assert!(!args.check_config);
        assert!(!args.list_keys);
    }

    #[test]
    fn test_args_with_bindings() {
        let args = Args::parse_from([
            "hookrs", "--bind", "ctrl,a", "--kind", "4", "--bind", "mleft", "--kind",
            "button_down", "--verbose",
        ]);
        assert_eq!(args.bind, vec!["ctrl,a", "mleft"]);
        assert_eq!(args.kind, vec!["4", "button_down"]);
        assert!(args.verbose);
    }

    #[test]
    fn test_cli_bindings() {
        let entries = cli_bindings(
            &["ctrl, a".to_string(), "mleft".to_string()],
            &["key_down".to_string(), "7".to_string()],
        )
        .unwrap();

        assert_eq!(entries[0].kind, EventKind::KeyDown);
        assert_eq!(entries[0].keys, vec!["ctrl", "a"]);
        assert_eq!(entries[0].display_name(), "ctrl, a");
        assert_eq!(entries[1].kind, EventKind::ButtonDown);
        assert_eq!(entries[1].keys, vec!["mleft"]);
    }

    #[test]
    fn test_cli_pointer_bindings() {
        let entries = cli_bindings(
            &["mright".to_string(), "wheel_up".to_string()],
            &["button_down".to_string(), "8".to_string()],
        )
        .unwrap();
        assert_eq!(entries[0].keys, vec!["mright"]);
        assert_eq!(entries[1].kind, EventKind::ButtonHold);
        assert_eq!(entries[1].keys, vec!["wheel_up"]);

        // A pointer name with a key kind is rejected up front
        let err = cli_bindings(&["mleft".to_string()], &["key_down".to_string()]).unwrap_err();
        assert!(err.to_string().contains("button kind"));

        let hook = Hook::new();
        let extra = Config::from_entries(entries);
        assert_eq!(register(&hook, &Config::default(), &extra).unwrap(), 2);
        assert!(hook.is_bound(EventKind::ButtonDown, &["mouse-right"]));
    }

    #[test]
    fn test_cli_bindings_must_pair() {
        assert!(cli_bindings(&["a".to_string()], &[]).is_err());
        assert!(cli_bindings(&["a".to_string()], &["press".to_string()]).is_err());
    }

    #[test]
    fn test_register_counts_both_sources() {
        let config = Config::from_toml_str(
            r#"
            [[binding]]
            kind = "key_up"
            keys = ["delete"]
            "#,
        )
        .unwrap();
        let extra = Config::from_entries(
            cli_bindings(&["ctrl,a".to_string()], &["4".to_string()]).unwrap(),
        );

        let hook = Hook::new();
        assert_eq!(register(&hook, &config, &extra).unwrap(), 2);
        assert!(hook.is_bound(EventKind::KeyDown, &["ctrl", "a"]));
    }
}
