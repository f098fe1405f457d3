//! AdOps - operator console entry point

use std::process::ExitCode;

use adops_console::cli::{Cli, Commands};
use adops_console::commands::{self, CommandReport};
use adops_console::utils::logging::init_logging;
use adops_console::AppContext;
use adops_domain::Credentials;
use anyhow::{bail, Context};
use clap::Parser;
use tracing::{error, info};

fn main() -> ExitCode {
    // .env first so ADOPS_* values are visible to clap and the config loader
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse();

    match run(cli, dotenv.ok().map(|p| p.display().to_string())) {
        Ok(report) => {
            for line in &report.lines {
                println!("{line}");
            }
            if report.success {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(err) => {
            error!(error = %format!("{err:#}"), "Command aborted");
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, dotenv_path: Option<String>) -> anyhow::Result<CommandReport> {
    let config = adops_infra::config::load(cli.config.clone()).context("loading configuration")?;
    let _log_guard = init_logging(&config.logging, cli.log_level.as_deref())?;
    if let Some(path) = dotenv_path {
        info!(path = %path, "Loaded .env");
    }

    let (Some(username), Some(password)) = (cli.username.clone(), cli.password.clone()) else {
        bail!("credentials required: pass --username/--password or set ADOPS_USERNAME/ADOPS_PASSWORD");
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("starting runtime")?;

    runtime.block_on(async move {
        let ctx = AppContext::new(config)?;
        let session = ctx.sessions.login(&Credentials::new(username, password)).await?;

        let report = match &cli.command {
            Commands::Geo(args) => commands::geo::run(&ctx, &session, args).await?,
            Commands::Pixel(args) => commands::pixel::run(&ctx, &session, args).await?,
            Commands::Report(args) => commands::report::run(&ctx, &session, args).await?,
        };

        info!(success = report.success, "Command finished");
        Ok::<_, anyhow::Error>(report)
    })
}
