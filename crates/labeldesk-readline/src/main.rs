mod command;
mod helper;
mod logging;
mod render;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use rustyline::Editor;
use rustyline::error::ReadlineError;

use command::{Command, HELP};
use helper::CliHelper;
use labeldesk_core::session::EngineState;
use labeldesk_core::{AnnotationEngine, SampleSource};
use labeldesk_execution::SessionDriver;
use labeldesk_infrastructure::{ConfigService, ExportWriter, load_samples};

/// Extra wait after the advance delay before the next item is rendered.
const RENDER_MARGIN: Duration = Duration::from_millis(20);

#[derive(Parser, Debug)]
#[command(name = "labeldesk", version, about = "Manual data-labeling session in the terminal")]
struct Args {
    /// Configuration file (defaults to the user config directory)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Sample file: a JSON array of strings or one item per line
    #[arg(long, value_name = "PATH")]
    samples: Option<PathBuf>,

    /// Directory export files are written to
    #[arg(long, value_name = "DIR")]
    export_dir: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose)?;

    // ===== Session Initialization =====
    let config_service = match &args.config {
        Some(path) => ConfigService::with_path(path),
        None => ConfigService::new()?,
    };
    let config = config_service
        .load()
        .with_context(|| format!("failed to load {}", config_service.path().display()))?;

    let source = match args.samples.as_ref().or(config.samples.as_ref()) {
        Some(path) => load_samples(path)
            .with_context(|| format!("failed to load samples from {}", path.display()))?,
        None => SampleSource::demo(),
    };
    let engine = AnnotationEngine::with_config(source, &config)?;
    let schema = engine.schema().clone();
    tracing::debug!(session_id = %engine.session_id(), items = engine.source().len(), "session started");

    let driver = SessionDriver::new(engine, config.advance_delay());
    let export_dir = args
        .export_dir
        .or(config.export_dir)
        .unwrap_or_else(|| PathBuf::from("."));
    let writer = ExportWriter::new(export_dir);

    // ===== REPL Setup =====
    let mut rl = Editor::new()?;
    rl.set_helper(Some(CliHelper::new(schema)));

    println!("{}", "=== LabelDesk ===".bright_magenta().bold());
    println!(
        "{}",
        "Type 'label <dimension> <value>' to annotate, 'submit' to record, 'help' for all commands."
            .bright_black()
    );
    render::item(&driver.snapshot().await);

    // ===== Main REPL Loop =====
    loop {
        let readline = rl.readline(">> ");

        match readline {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(&line);

                let command = match Command::parse(trimmed) {
                    Ok(command) => command,
                    Err(message) => {
                        render::error(message);
                        continue;
                    }
                };

                match command {
                    Command::Quit => {
                        println!("{}", "Goodbye!".bright_green());
                        break;
                    }
                    Command::Clear => {
                        if confirm_clear(&mut rl)? {
                            driver.clear_session().await;
                            render::notice("All data cleared");
                            render::item(&driver.snapshot().await);
                        } else {
                            println!("{}", "Clear cancelled".bright_black());
                        }
                    }
                    command => dispatch(&driver, &writer, command).await,
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    Ok(())
}

/// Runs one session command and renders its outcome.
async fn dispatch(driver: &SessionDriver, writer: &ExportWriter, command: Command) {
    match command {
        Command::Show => render::item(&driver.snapshot().await),
        Command::Label { dimension, value } => {
            match driver.select_label(&dimension, &value).await {
                Ok(()) => render::item(&driver.snapshot().await),
                Err(err) => render::error(err),
            }
        }
        Command::Reset => match driver.reset_draft().await {
            Ok(()) => render::item(&driver.snapshot().await),
            Err(err) => render::error(err),
        },
        Command::Submit => match driver.submit().await {
            Ok(annotation) => {
                render::notice(format!(
                    "Item #{} completed ({}s)",
                    annotation.item_id, annotation.time_spent_seconds
                ));
                tokio::time::sleep(driver.advance_delay() + RENDER_MARGIN).await;
                let snapshot = driver.snapshot().await;
                if snapshot.state == EngineState::Pending {
                    render::item(&snapshot);
                }
            }
            Err(err) => render::error(err),
        },
        Command::Skip => match driver.skip().await {
            Ok(()) => render::item(&driver.snapshot().await),
            Err(err) => render::error(err),
        },
        Command::Goto(id) => {
            let total = driver.with_engine(|engine| engine.source().len()).await;
            if id > total {
                render::error(format!("item #{} does not exist (1-{})", id, total));
            } else {
                driver.load_item(id - 1).await;
                render::item(&driver.snapshot().await);
            }
        }
        Command::Stats => render::stats(&driver.stats().await),
        Command::Log => {
            let entries = driver.with_engine(|engine| engine.activity().to_vec()).await;
            render::activity(&entries);
        }
        Command::Export(format) => {
            let written = driver
                .export(format)
                .await
                .and_then(|content| writer.write(format, &content));
            match written {
                Ok(path) => render::notice(format!(
                    "Data exported to {} format: {}",
                    format.label(),
                    path.display()
                )),
                Err(err) => render::error(err),
            }
        }
        Command::Report => match driver.generate_report().await {
            Ok(report) => render::report(&report),
            Err(err) => render::error(err),
        },
        Command::Help => println!("{}", HELP.bright_black()),
        Command::Clear | Command::Quit => {}
    }
}

fn confirm_clear(rl: &mut Editor<CliHelper, rustyline::history::DefaultHistory>) -> Result<bool> {
    println!(
        "{}",
        "Are you sure you want to clear all session data? This cannot be undone. (yes/no)"
            .bright_yellow()
    );
    match rl.readline("?? ") {
        Ok(answer) => Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "yes" | "y")),
        Err(ReadlineError::Interrupted | ReadlineError::Eof) => Ok(false),
        Err(err) => Err(err.into()),
    }
}
