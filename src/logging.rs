//! Log output setup.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Filter built from `RUST_LOG`-style directives, falling back to INFO when
/// none are given or none parse.
pub fn env_filter(directives: Option<&str>) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse_lossy(directives.unwrap_or_default())
}

/// Installs the global subscriber, filtered by `RUST_LOG`.
pub fn init() {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(env_filter(directives.as_deref()))
        .with_file(true)
        .with_line_number(true)
        .with_target(false)
        .compact()
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_info() {
        assert_eq!(env_filter(None).max_level_hint(), Some(LevelFilter::INFO));
        assert_eq!(env_filter(Some("")).max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn test_bare_level_is_honoured() {
        assert_eq!(env_filter(Some("debug")).max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(env_filter(Some("warn")).max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn test_target_directive_is_honoured() {
        assert_eq!(
            env_filter(Some("moon_phase=trace")).max_level_hint(),
            Some(LevelFilter::TRACE)
        );
    }
}
