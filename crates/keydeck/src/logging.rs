use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Filter directive for the given verbosity flags. `RUST_LOG` takes precedence.
fn default_directive(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn,keydeck=info",
        1 => "warn,keydeck=debug",
        _ => "info,keydeck=trace",
    }
}

/// Install the stderr subscriber. Safe to call once per process.
pub fn init(verbose: u8, quiet: bool, no_color: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));

    let result = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(!no_color)
                .with_target(verbose > 1),
        )
        .try_init();

    if let Err(e) = result {
        eprintln!("Logging already initialized: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(default_directive(0, false), "warn,keydeck=info");
        assert_eq!(default_directive(1, false), "warn,keydeck=debug");
        assert_eq!(default_directive(3, false), "info,keydeck=trace");
    }

    #[test]
    fn test_quiet_wins() {
        assert_eq!(default_directive(2, true), "error");
    }
}
