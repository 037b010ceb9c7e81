use actuator_beat_collector::{
    Collector,
    JsonLinesPublisher,
    Publisher,
};
use actuator_beat_config::{
    Args,
    Config,
    OutputConfig,
};
use color_eyre::{
    eyre::WrapErr,
    Result,
};
use std::sync::Arc;

pub struct App {
    config: Config,
}

impl App {
    pub fn new(args: Args) -> Result<Self> {
        let config = Config::new(args).wrap_err("Failed to load configuration")?;
        debug!(config_dir = %config.config_dir().display(), ?config, "Loaded configuration");
        Ok(Self { config })
    }

    /// Collects until ctrl-c is received.
    pub async fn run(self) -> Result<()> {
        let publisher = open_publisher(&self.config.output)?;
        let mut collector = Collector::start(&self.config.collector, Arc::clone(&publisher))?;

        let signal = tokio::signal::ctrl_c().await;
        info!("Shutting down");
        collector.stop().await;
        publisher.flush()?;

        signal.wrap_err("Failed to listen for ctrl-c")
    }
}

fn open_publisher(output: &OutputConfig) -> Result<Arc<dyn Publisher>> {
    Ok(match &output.file {
        Some(path) => {
            let publisher = JsonLinesPublisher::file(path, output.pretty)
                .wrap_err_with(|| format!("Failed to open output file {}", path.display()))?;
            info!(path = %path.display(), "Writing events to file");
            Arc::new(publisher)
        }
        None => Arc::new(JsonLinesPublisher::stdout(output.pretty)),
    })
}
