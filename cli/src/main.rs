//! Sales Console - terminal client for the sales backend
//!
//! # Usage
//!
//! ```bash
//! # Interactive mode
//! sales -u http://localhost:8080/api
//!
//! # Single command
//! sales -c "customers maria"
//!
//! # JSON output
//! sales --json -c "products"
//! ```

use clap::Parser;
use std::time::Duration;

use sales_cli::{CLIError, ConsoleConfig, OutputFormat, Result, SessionStore};
use sales_link::SalesClient;

mod args;

use args::Cli;
use sales_cli::session::ConsoleSession;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
            .init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    if cli.no_color {
        colored::control::set_override(false);
    }

    let mut config = ConsoleConfig::load(&cli.config)?;
    if let Some(page_size) = cli.page_size {
        let mut ui = config.resolved_ui();
        ui.page_size = page_size;
        config.ui = Some(ui);
    }

    let store = SessionStore::new()?;

    // Precedence: command line over config file
    let server = config.resolved_server();
    let base_url = cli
        .url
        .or(server.url)
        .ok_or_else(|| CLIError::Configuration("No server URL; pass --url or set [server].url".into()))?;
    let timeout = cli.timeout.unwrap_or(server.timeout);

    // Precedence: command line token over stored session
    let token = cli.token.or_else(|| store.token().map(str::to_string));

    let mut builder = SalesClient::builder()
        .base_url(&base_url)
        .timeout(Duration::from_secs(timeout));
    if let Some(token) = token {
        builder = builder.bearer_token(token);
    }
    let client = builder.build()?;

    let format = if cli.json {
        OutputFormat::Json
    } else {
        cli.format
    };

    let mut session = ConsoleSession::new(
        client,
        store,
        config,
        format,
        !cli.no_color,
        !cli.no_spinner,
    );

    match cli.command {
        Some(command) => session.execute_batch(&command).await?,
        None => session.run_interactive().await?,
    }

    Ok(())
}
