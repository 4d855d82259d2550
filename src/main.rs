mod cli;
mod application;
mod domain;
mod data;
mod retrieval;
mod validation;
mod ml;
mod infra;

use anyhow::Result;
use cli::Cli;
use clap::Parser;

fn main() -> Result<()> {
    // Logs go to stderr so answers on stdout stay machine readable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("dept_site_qa=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    cli.run()
}
