//! logging stuff
use {
    crate::{
        config::options::{LoggingConfig, LoggingFormat},
        utils::string_to_log_level,
    },
    color_eyre::Result,
    tracing::{Level, debug, subscriber},
    tracing_subscriber::FmtSubscriber,
};

/// the max level to log at, or None if nothing should be logged
pub fn max_level(cfg: &LoggingConfig) -> Option<Level> {
    if !cfg.enable || cfg.level.eq_ignore_ascii_case("off") {
        return None;
    }

    Some(string_to_log_level(&cfg.level))
}

/// setup logging
pub fn setup(cfg: &LoggingConfig) -> Result<()> {
    let Some(max_level) = max_level(cfg) else {
        return Ok(());
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(max_level)
        .with_ansi(cfg.ansi)
        .with_line_number(cfg.line_numbers)
        .with_target(cfg.event_targets);

    match cfg.format {
        LoggingFormat::Pretty => {
            subscriber::set_global_default(subscriber.pretty().finish())?;
        }
        LoggingFormat::Compact => {
            subscriber::set_global_default(subscriber.compact().finish())?;
        }
    }

    debug!("Logging setup successfully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_off_disables_logging() {
        let mut cfg = LoggingConfig::default();
        assert_eq!(max_level(&cfg), Some(Level::INFO));

        cfg.level = "OFF".to_string();
        assert_eq!(max_level(&cfg), None);

        cfg.level = "debug".to_string();
        cfg.enable = false;
        assert_eq!(max_level(&cfg), None);
    }
}
