//! CareerGuide CLI — career assistant over the TechGuide.sh catalog.
//!
//! Scrapes the public careers site, summarizes and answers questions about
//! a career through the Gemini API, and recognizes `@` productivity
//! commands as typed values.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
