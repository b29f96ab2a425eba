use std::sync::Once;

use log::LevelFilter;

/// Logger settings for the `ombre` binary.
///
/// `env_filter` uses `env_logger` directives, e.g. `"debug"` or
/// `"ombre_export=info"`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { env_filter: None, write_style: env_logger::WriteStyle::Auto }
    }
}

/// Level used when neither `--log` nor `RUST_LOG` is set. Export success
/// lines are `info`, so a plain run only shows problems.
pub const DEFAULT_LEVEL: LevelFilter = LevelFilter::Warn;

static INIT: Once = Once::new();

/// Installs the global logger; only the first call has an effect.
///
/// Precedence: `config.env_filter`, then `RUST_LOG`, then [`DEFAULT_LEVEL`].
/// Output goes to stderr so studio frames and `ombre css` output on stdout
/// stay clean.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();
        match config.env_filter.or_else(|| std::env::var("RUST_LOG").ok()) {
            Some(filter) => builder.parse_filters(&filter),
            None => builder.filter_level(DEFAULT_LEVEL),
        };

        builder
            .write_style(config.write_style)
            .format_timestamp(None)
            .target(env_logger::Target::Stderr)
            .init();

        log::debug!("logger ready (max level {})", log::max_level());
    });
}
