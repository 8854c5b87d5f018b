use std::{env, io};

use clap::Parser;
use toml_base_config::BaseConfig;
use tracing_subscriber::filter::EnvFilter;

use witgen::commands;
use witgen::prelude::*;

fn main() -> io::Result<()> {
    let args = Args::parse().resolve()?;
    let config = Config::load()?;

    let filter = env::var_os("RUST_LOG")
        .map(|_| EnvFilter::try_from_default_env())
        .transpose()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?
        .unwrap_or_else(|| EnvFilter::new("info"));

    tracing_subscriber::fmt::Subscriber::builder()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    commands::run(args, &config)
}
