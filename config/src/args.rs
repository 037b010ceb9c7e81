use clap::Parser;
use std::path::PathBuf;

/// Polls actuator /metrics and /health endpoints and prints them as events.
#[derive(Parser, Debug, Clone, Default)]
#[command(author, version = version(), about, long_about = None)]
pub struct Args {
    /// Additional YAML config file, applied on top of the stored configuration.
    #[clap(long, value_name = "FILE", env = "ACTUATOR_BEAT_CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Polling period per endpoint (e.g. "10s", "500ms").
    #[clap(long, value_name = "DURATION", env = "ACTUATOR_BEAT_PERIOD")]
    pub period: Option<String>,

    /// Base URL of an application to poll. Can be given multiple times.
    #[clap(long = "url", value_name = "URL", env = "ACTUATOR_BEAT_URLS", value_delimiter = ',')]
    pub urls: Vec<String>,

    /// Collect the /metrics endpoint.
    #[clap(long, value_name = "BOOL", env = "ACTUATOR_BEAT_METRICS")]
    pub metrics: Option<bool>,

    /// Collect the /health endpoint.
    #[clap(long, value_name = "BOOL", env = "ACTUATOR_BEAT_HEALTH")]
    pub health: Option<bool>,

    /// Append events to this file instead of writing them to stdout.
    #[clap(long = "output-file", value_name = "FILE", env = "ACTUATOR_BEAT_OUTPUT_FILE")]
    pub output_file: Option<PathBuf>,

    /// Pretty-print events instead of writing one JSON object per line.
    #[clap(long, action)]
    pub pretty: bool,

    /// Enables debug logging.
    #[clap(long = "verbose", short, action)]
    pub verbose: bool,
}

mod config_ext {
    use super::*;
    use config::{
        Map,
        Source,
        Value,
    };
    use std::collections::HashMap;

    impl Source for Args {
        fn clone_into_box(&self) -> Box<dyn Source + Send + Sync> {
            Box::new((*self).clone())
        }

        fn collect(&self) -> Result<Map<String, Value>, config::ConfigError> {
            let mut cache = HashMap::<String, Value>::new();
            if let Some(period) = &self.period {
                cache.insert("collector.period".to_string(), period.clone().into());
            }
            if !self.urls.is_empty() {
                cache.insert("collector.urls".to_string(), self.urls.clone().into());
            }
            if let Some(metrics) = self.metrics {
                cache.insert("collector.stats.metrics".to_string(), metrics.into());
            }
            if let Some(health) = self.health {
                cache.insert("collector.stats.health".to_string(), health.into());
            }
            if let Some(output_file) = &self.output_file {
                cache.insert("output.file".to_string(), output_file.display().to_string().into());
            }
            if self.pretty {
                cache.insert("output.pretty".to_string(), true.into());
            }
            Ok(cache)
        }
    }
}

pub fn version() -> String {
    let author = clap::crate_authors!();
    let config_dir_path = crate::get_config_dir().display().to_string();

    format!(
        "\
{version}

Authors: {author}

Config directory: {config_dir_path}",
        version = clap::crate_version!()
    )
}
