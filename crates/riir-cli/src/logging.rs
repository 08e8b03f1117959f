//! Diagnostic logging for the CLI.
//!
//! Logs go to stderr so `--json` output on stdout stays parseable.
//! `RUST_LOG` overrides the level chosen by `--verbose`.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Filter directive for a `--verbose` count.
pub fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "warn,riir_dsp=debug,riir_cli=debug",
        _ => "warn,riir_dsp=trace,riir_cli=trace",
    }
}

/// Installs the global subscriber. Calling it twice keeps the first one.
pub fn init(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let result = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .compact()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .try_init();

    if let Err(e) = result {
        tracing::debug!("logging already initialized: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(default_directive(0), "warn");
        assert!(default_directive(1).contains("riir_dsp=debug"));
        assert!(default_directive(5).contains("trace"));
    }

    #[test]
    fn test_directives_parse() {
        for verbose in 0..3 {
            assert!(EnvFilter::try_new(default_directive(verbose)).is_ok());
        }
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init(0);
        init(2);
    }
}
