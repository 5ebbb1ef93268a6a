//! Portal CLI - Main entry point

use clap::Parser;
use colored::Colorize;
use portal_cli::commands::{self, CommandContext};
use portal_cli::forms::IriKind;
use portal_cli::{render, Cli, Commands, Config, ConfigCommand, IriCommand, TableCommand};
use portal_common::logging::{init_logging, LogConfig, LogLevel, LogOutput};
use std::process;
use tracing::{debug, error};

#[tokio::main]
async fn main() {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    if cli.markdown_help {
        println!("{}", clap_markdown::help_markdown::<Cli>());
        return;
    }

    let Some(command) = cli.command.as_ref() else {
        eprintln!("Error: A subcommand is required");
        eprintln!();
        eprintln!("For more information, try '--help'.");
        process::exit(2);
    };

    // Console logs go to stderr; stdout carries command output only
    let log_config = LogConfig::builder()
        .level(if cli.verbose { LogLevel::Debug } else { LogLevel::Warn })
        .output(LogOutput::Console)
        .log_file_prefix("portal-cli")
        .build();

    // Environment variables take precedence
    let log_config = match log_config.clone().merge_env() {
        Ok(merged) => merged,
        Err(e) => {
            eprintln!("Warning: ignoring logging environment: {}", e);
            log_config
        },
    };

    // The CLI works without logging
    let _log_guard = init_logging(&log_config).ok();

    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(e) => fail(&e),
    };
    render::init_styles(config.no_color);
    debug!(api_url = %config.api_url(), timeout_secs = config.timeout_secs, "Configuration resolved");

    if let Err(e) = execute_command(&cli, command, &config).await {
        fail(&e);
    }
}

fn fail(e: &portal_cli::CliError) -> ! {
    error!(error = %e, "Command failed");
    eprintln!("{}\n{}", "Error:".red().bold(), render::error(e));
    process::exit(1);
}

/// Defaults, file and environment, then flags on top
fn resolve_config(cli: &Cli) -> portal_cli::Result<Config> {
    let mut config = Config::load(cli.config.as_deref())?;

    if let Some(url) = &cli.api_url {
        config.set_api_url(url.as_str());
    }
    if cli.no_color {
        config.no_color = true;
    }

    Ok(config)
}

/// Execute the CLI command
async fn execute_command(cli: &Cli, command: &Commands, config: &Config) -> portal_cli::Result<()> {
    let context = || CommandContext::new(config, cli.json);

    match command {
        Commands::Ping => commands::ping::run(&context()?).await,

        Commands::Iri { command } => {
            let (kind, args) = match command {
                IriCommand::CategoryBrand(args) => (IriKind::CategoryBrand, args),
                IriCommand::Items(args) => (IriKind::Items, args),
            };
            commands::iri::run(
                &context()?,
                kind,
                args.source.clone(),
                args.year.clone(),
                args.month.clone(),
                args.files.clone(),
            )
            .await
        },

        Commands::Pos { since } => commands::pos::run(&context()?, since.clone()).await,

        Commands::Pmr { from, to } => {
            commands::pmr::run(&context()?, from.clone(), to.clone()).await
        },

        Commands::Table { command } => match command {
            TableCommand::Create(args) => {
                commands::table::create(
                    &context()?,
                    args.table.clone(),
                    args.columns.clone(),
                    args.no_defaults,
                )
                .await
            },
            TableCommand::Populate { table, file } => {
                commands::table::populate(
                    &context()?,
                    table.table.clone(),
                    table.columns.clone(),
                    table.no_defaults,
                    file.clone(),
                )
                .await
            },
        },

        Commands::Config { command } => match command {
            ConfigCommand::Show => commands::config::show(config, cli.json),
        },
    }
}
