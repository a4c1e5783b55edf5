use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};

use rusty_ai_demo::config::DemoConfig;
use rusty_ai_demo::demo::DemoRunner;
use rusty_ai_demo::logging;

fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();
    logging::init();

    let config = DemoConfig::from_env();
    log::debug!("demo config: {config:?}");

    let outcome = DemoRunner::new(config, io::stdout().lock())
        .run()
        .context("writing demo output")?;

    Ok(if outcome.all_passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
