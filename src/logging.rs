use std::path::Path;

use anyhow::Context;
use log::LevelFilter;
use log4rs::{
    append::console::ConsoleAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    Config,
};

const CONFIG_FILE: &str = "log4rs.yml";
const PATTERN: &str = "{d(%H:%M:%S%.3f)} {h({l:<5})} {t} - {m}{n}";

/// Configures log4rs from `log4rs.yml` when present, otherwise logs to the console.
pub fn init_logging() -> anyhow::Result<()> {
    if Path::new(CONFIG_FILE).exists() {
        log4rs::init_file(CONFIG_FILE, Default::default()).context("Could not configure logger")?;
    } else {
        log4rs::init_config(console_config(LevelFilter::Info)?)
            .context("Could not configure logger")?;
    }

    #[cfg(feature = "tracing")]
    init_tracing()?;

    Ok(())
}

fn console_config(level: LevelFilter) -> anyhow::Result<Config> {
    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(PATTERN)))
        .build();

    Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(Root::builder().appender("stdout").build(level))
        .context("Building console logger config")
}

#[cfg(feature = "tracing")]
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::layer::SubscriberExt;

    tracing::subscriber::set_global_default(
        tracing_subscriber::registry().with(tracing_tracy::TracyLayer::new()),
    )
    .context("Setting tracing subscriber")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn console_config_has_root_appender() {
        let config = console_config(LevelFilter::Debug).unwrap();
        assert_eq!(config.root().level(), LevelFilter::Debug);
        assert_eq!(config.root().appenders(), ["stdout".to_string()]);
        assert_eq!(config.appenders().len(), 1);
    }
}
