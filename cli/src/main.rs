use clap::Parser;
use mm_cli::parsers::ElementOptions;
use mm_cli::runs::run;
use mm_cli::{Args, CliError};
use tracing_forest::ForestLayer;
use tracing_forest::util::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

fn main() -> Result<(), CliError> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    Registry::default()
        .with(env_filter)
        .with(ForestLayer::default())
        .init();

    let args = Args::parse();
    match args.element {
        ElementOptions::I32 => run::<i32>(&args),
        ElementOptions::I64 => run::<i64>(&args),
    }
}
