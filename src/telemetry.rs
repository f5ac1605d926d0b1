//! `tracing` subscriber setup: env-filtered fmt layer on stderr.

use once_cell::sync::OnceCell;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "REPLSCOPE_LOG";

static INIT: OnceCell<()> = OnceCell::new();

fn filter_directive(verbose: bool) -> String {
    [LOG_ENV, "RUST_LOG"]
        .iter()
        .filter_map(|k| std::env::var(k).ok())
        .map(|v| v.trim().to_string())
        .find(|v| !v.is_empty())
        .unwrap_or_else(|| if verbose { "info" } else { "warn" }.to_string())
}

/// Install the global subscriber once. Returns false when it was already installed
/// (by this function or by someone else).
pub fn init_tracing(verbose: bool) -> bool {
    if INIT.get().is_some() {
        return false;
    }
    let directive = filter_directive(verbose);
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("warn"));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    if tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        return false;
    }
    let _ = INIT.set(());
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_a_noop() {
        let _ = init_tracing(false);
        assert!(!init_tracing(true));
    }
}
