use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};

use rusty_ai_demo::config::SmokeConfig;
use rusty_ai_demo::logging;
use rusty_ai_demo::smoke::{run_suite, ServiceClient};

fn wait_for_enter() -> Result<()> {
    print!("Press Enter to start testing... ");
    io::stdout().flush().context("flushing prompt")?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("reading from stdin")?;
    Ok(())
}

fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();
    logging::init();

    let mut config = SmokeConfig::from_env();
    config.apply_args(std::env::args().skip(1));
    log::debug!("smoke config: {config:?}");

    println!("🚀 Web Application Test Suite");
    println!(
        "📅 Run Date: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    println!("🌐 Target URL: {}", config.base_url);
    println!();
    println!("⚠️  Make sure the web application is running before executing tests!");
    println!();

    if !config.skip_prompt {
        wait_for_enter()?;
    }

    let client = ServiceClient::new(&config);
    let mut stdout = io::stdout().lock();
    let summary = run_suite(&client, &mut stdout).context("writing test report")?;

    if summary.all_passed() {
        writeln!(stdout, "\n✨ Testing completed successfully!")?;
        Ok(ExitCode::SUCCESS)
    } else {
        writeln!(stdout, "\n🔧 Testing completed with issues. Check the logs above.")?;
        Ok(ExitCode::FAILURE)
    }
}
