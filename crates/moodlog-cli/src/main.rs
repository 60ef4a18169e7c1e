//! Moodlog CLI - A local, CLI-first mood journal
//!
//! This is the command-line interface for Moodlog. It provides a user-friendly
//! interface to the core library functionality.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod output;
mod ui;

use clap::{CommandFactory, Parser};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::app::AppContext;
use crate::cli::{Cli, Commands};
use crate::commands::{entries, init, misc, shell, stats, transfer};
use crate::errors::{exit_code_for, split_hint};
use crate::ui::print_error;

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let ctx = AppContext::new(&cli);

    if let Err(e) = run(&ctx, &cli) {
        let ui_ctx = ctx.ui_context(false, None);
        let error_msg = format!("{}", e);
        let (message, hint) = split_hint(&error_msg);
        print_error(&ui_ctx, message, hint);
        std::process::exit(exit_code_for(&e));
    }
}

/// Install the stderr log subscriber.
///
/// `MOODLOG_LOG` takes an `EnvFilter` directive (default `warn`);
/// `MOODLOG_LOG_FORMAT=json` switches to JSON lines.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("MOODLOG_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let json = std::env::var("MOODLOG_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn run(ctx: &AppContext, cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Some(Commands::Init(args)) => {
            init::handle_init(ctx, args)?;
        }
        Some(Commands::Add(args)) => {
            entries::handle_add(ctx, args)?;
        }
        Some(Commands::Edit(args)) => {
            entries::handle_edit(ctx, args)?;
        }
        Some(Commands::Toggle(args)) => {
            entries::handle_toggle(ctx, args)?;
        }
        Some(Commands::Delete(args)) => {
            entries::handle_delete(ctx, args)?;
        }
        Some(Commands::List(args)) => {
            entries::handle_list(ctx, args)?;
        }
        Some(Commands::Show(args)) => {
            entries::handle_show(ctx, args)?;
        }
        Some(Commands::Stats(args)) => {
            stats::handle_stats(ctx, args)?;
        }
        Some(Commands::Export(args)) => {
            transfer::handle_export(ctx, args)?;
        }
        Some(Commands::Import(args)) => {
            transfer::handle_import(ctx, args)?;
        }
        Some(Commands::Shell) => {
            shell::handle_shell(ctx)?;
        }
        Some(Commands::Completions(args)) => {
            misc::handle_completions(args)?;
        }
        None => {
            Cli::command().print_help()?;
            println!();
        }
    }
    Ok(())
}
