use tracing_subscriber::filter::{Directive, EnvFilter};
use tracing_subscriber::fmt::format;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::prelude::*;

/// Directives applied on top of the default level
const QUIET_TARGETS: &[&str] = &[
    "bevy_winit::system=info",
    // Suppress very noisy render layer messages completely
    "wgpu_core=error",
    "wgpu_hal=error",
    "bevy_render=error",
];

/// Custom logger initialization to exclude timestamps but keep colors.
/// This provides cleaner logs by removing the timestamp prefix.
///
/// Use SNAPLINE_LOG=info or SNAPLINE_LOG=debug environment variable to increase verbosity.
/// Example: SNAPLINE_LOG=snapline=trace cargo run
pub fn init_custom_logger() {
    // Empty time formatter that doesn't print anything
    struct EmptyTime;
    impl FormatTime for EmptyTime {
        fn format_time(
            &self,
            _: &mut tracing_subscriber::fmt::format::Writer<'_>,
        ) -> std::fmt::Result {
            // Do nothing, effectively removing timestamps
            Ok(())
        }
    }

    // Check if user wants to override log level (default to warn for minimal noise)
    let default_level =
        std::env::var("SNAPLINE_LOG").unwrap_or_else(|_| "warn".to_string());

    let format = format()
        .with_timer(EmptyTime)
        .with_level(true)
        .with_target(true)
        .with_ansi(true); // Keep colors

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_filter(build_filter(&default_level)),
        )
        .init();
}

/// Env filter for `default_level`, falling back to `warn` if it doesn't parse
fn build_filter(default_level: &str) -> EnvFilter {
    let level = default_level.parse::<Directive>().unwrap_or_else(|err| {
        eprintln!("Ignoring invalid SNAPLINE_LOG value '{default_level}': {err}");
        Directive::from(tracing_subscriber::filter::LevelFilter::WARN)
    });

    QUIET_TARGETS
        .iter()
        .filter_map(|directive| directive.parse::<Directive>().ok())
        .fold(
            EnvFilter::from_default_env().add_directive(level),
            EnvFilter::add_directive,
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_level_falls_back() {
        let filter = build_filter("snapline=loud");
        assert!(filter.to_string().contains("warn"));
    }

    #[test]
    fn test_quiet_targets_parse() {
        for directive in QUIET_TARGETS {
            assert!(directive.parse::<Directive>().is_ok(), "{directive}");
        }
    }
}
