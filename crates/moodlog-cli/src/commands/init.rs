use std::path::{Path, PathBuf};

use moodlog_core::fs::write_atomic;

use crate::app::{resolve_config_path, AppContext};
use crate::cli::InitArgs;
use crate::config::{default_journal_path, write_config, MoodlogConfig};
use crate::errors::CliError;
use crate::ui::{badge, blank_line, hint, print, Badge, OutputMode};

const EMPTY_JOURNAL: &str = "[]";

pub fn handle_init(ctx: &AppContext, args: &InitArgs) -> anyhow::Result<()> {
    let config_path = resolve_config_path()?;
    if config_path.exists() && !args.force {
        return Err(CliError::invalid_input(format!(
            "Config already exists at {} (use --force to overwrite)",
            config_path.display()
        ))
        .into());
    }

    let journal_path = match args.path.as_deref().or(ctx.cli().journal.as_deref()) {
        Some(path) if !path.trim().is_empty() => absolute(Path::new(path))?,
        _ => default_journal_path()?,
    };

    let created_journal = !journal_path.exists();
    if created_journal {
        write_atomic(&journal_path, EMPTY_JOURNAL.as_bytes()).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create journal {}: {}",
                journal_path.display(),
                e
            )
        })?;
    }

    let config = MoodlogConfig::new(journal_path.clone());
    write_config(&config_path, &config)?;
    tracing::debug!(
        config = %config_path.display(),
        journal = %journal_path.display(),
        "wrote config"
    );

    if ctx.quiet() {
        return Ok(());
    }
    let ui_ctx = ctx.ui_context(false, None);
    match ui_ctx.mode {
        OutputMode::Pretty => {
            let journal_message = if created_journal {
                format!("Journal created at {}", journal_path.display())
            } else {
                format!("Using existing journal at {}", journal_path.display())
            };
            print(&ui_ctx, &badge(&ui_ctx, Badge::Ok, &journal_message));
            print(
                &ui_ctx,
                &badge(
                    &ui_ctx,
                    Badge::Ok,
                    &format!("Config written to {}", config_path.display()),
                ),
            );
            blank_line(&ui_ctx);
            print(
                &ui_ctx,
                &hint(
                    &ui_ctx,
                    "moodlog add -c <TEXT> -m <1-5>  \u{00B7}  moodlog list  \u{00B7}  moodlog --help",
                ),
            );
        }
        OutputMode::Plain | OutputMode::Json => {
            println!("status=ok");
            println!("journal_path={}", journal_path.display());
            println!("config_path={}", config_path.display());
            println!("created_journal={}", created_journal);
        }
    }
    Ok(())
}

fn absolute(path: &Path) -> anyhow::Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}
