use actuator_beat::{
    init_errors,
    init_logging,
    App,
    Args,
};
use clap::Parser;
use color_eyre::Result;

#[tokio::main]
async fn main() -> Result<()> {
    init_errors()?;
    let args = Args::parse();
    init_logging(args.verbose)?;

    App::new(args)?.run().await
}
