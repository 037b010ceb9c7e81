#[macro_use]
extern crate tracing;

mod app_config;
mod args;
mod collector_config;

use app_config::AppConfig;
pub use app_config::get_config_dir;
pub use args::Args;
pub use collector_config::{
    CollectorConfig,
    OutputConfig,
    StatsConfig,
};
use serde::{
    Deserialize,
    Serialize,
};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(flatten, skip_serializing)]
    app_config: AppConfig,
    #[serde(default)]
    pub collector: CollectorConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

const DEFAULT_CONFIG: &str = include_str!("default-config.yaml");

impl Default for Config {
    fn default() -> Self {
        serde_yml::from_str(DEFAULT_CONFIG).expect("Failed to parse default config")
    }
}

impl Config {
    /// Loads the configuration, lowest precedence first: built-in defaults, `config.yaml` in the
    /// config directory, the file passed with `--config` and finally the command-line arguments.
    pub fn new(args: Args) -> Result<Self, config::ConfigError> {
        Self::load(args, &get_config_dir())
    }

    /// Same as [`Config::new`] with `config.yaml` looked up in `config_dir`.
    pub fn load(args: Args, config_dir: &std::path::Path) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .set_default("config_dir", config_dir.display().to_string())?
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Yaml));

        let config_files = [("config.yaml", config::FileFormat::Yaml)];

        for (file, format) in &config_files {
            let source = config::File::from(config_dir.join(file))
                .format(*format)
                .required(false);
            builder = builder.add_source(source);
        }

        if let Some(path) = &args.config {
            debug!(?path, "Loading additional config file");
            builder = builder.add_source(
                config::File::from(path.as_path())
                    .format(config::FileFormat::Yaml)
                    .required(true),
            );
        }

        builder = builder.add_source(args);

        let cfg: Self = builder.build()?.try_deserialize()?;

        Ok(cfg)
    }

    pub fn config_dir(&self) -> &std::path::Path {
        &self.app_config.config_dir
    }
}
