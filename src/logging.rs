//! Logging setup shared by the binaries

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Initialise the global subscriber.
///
/// Filter precedence: `level_override` (CLI verbosity flags), then
/// `RUST_LOG`, then the configured level. `format = "json"` selects JSON
/// lines; anything else is the pretty formatter.
pub fn init(config: &LoggingConfig, level_override: Option<&str>) {
    let filter = match level_override {
        Some(level) => EnvFilter::new(directive(level)),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(directive(&config.level))),
    };

    let registry = tracing_subscriber::registry().with(filter);

    if config.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Scope a bare level to this crate; full directives pass through
fn directive(level: &str) -> String {
    if level.contains('=') || level.contains(',') {
        level.to_string()
    } else {
        format!("mortimer={level},warn")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directive() {
        assert_eq!(directive("debug"), "mortimer=debug,warn");
        assert_eq!(directive("mortimer=trace"), "mortimer=trace");
    }
}
