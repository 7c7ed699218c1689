use std::{io::Write as _, path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{
    load_settings, normalize_base_url, DeleteOutcome, FlowError, HttpPostStore, Notice, PostBoard,
    DELETE_CONFIRMATION,
};
use tokio::{
    io::{stdin, AsyncBufReadExt, BufReader, Lines, Stdin},
    sync::mpsc::UnboundedReceiver,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod commands;
mod render;

use commands::{command_name, parse_command, BoardCommand, HELP};
use render::{render_board, render_notice};

#[derive(Parser, Debug)]
#[command(name = "post-board", about = "Browse, create, edit and delete posts on a REST backend")]
struct Args {
    /// Collection URL, e.g. http://localhost:3000/posts
    #[arg(long)]
    base_url: Option<String>,
    /// Settings file; defaults to ./post_board.toml when present
    #[arg(long)]
    config: Option<PathBuf>,
}

struct Console {
    lines: Lines<BufReader<Stdin>>,
}

impl Console {
    fn new() -> Self {
        Self {
            lines: BufReader::new(stdin()).lines(),
        }
    }

    /// `None` once stdin is closed.
    async fn ask(&mut self, label: &str) -> Result<Option<String>> {
        print!("{label}");
        std::io::stdout().flush().context("failed to flush stdout")?;
        self.lines
            .next_line()
            .await
            .context("failed to read from stdin")
    }

    async fn confirm(&mut self, question: &str) -> Result<bool> {
        let answer = self.ask(&format!("{question} [y/N] ")).await?;
        Ok(matches!(
            answer.as_deref().map(str::trim),
            Some("y" | "Y" | "yes" | "Yes")
        ))
    }
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_notices(notices: &mut UnboundedReceiver<Notice>) {
    while let Ok(notice) = notices.try_recv() {
        println!("{}", render_notice(&notice));
    }
}

/// Keeps the current value when the user just presses enter.
fn keep_or_replace(current: &mut String, input: Option<String>) {
    if let Some(input) = input {
        if !input.is_empty() {
            *current = input;
        }
    }
}

async fn run_command(
    board: &mut PostBoard,
    console: &mut Console,
    cmd: BoardCommand,
) -> Result<Result<(), FlowError>> {
    let outcome = match cmd {
        BoardCommand::List => board.display_posts().await,
        BoardCommand::Open(id) => board.handle_post_click(&id).await,
        BoardCommand::New => {
            let title = console.ask("title: ").await?.unwrap_or_default();
            let content = console.ask("content: ").await?.unwrap_or_default();
            let author = console.ask("author: ").await?.unwrap_or_default();
            let form = board.new_post_form_mut();
            form.title = title;
            form.content = content;
            form.author = author;
            board.submit_new_post().await
        }
        BoardCommand::Edit => board.begin_edit().await,
        BoardCommand::Save => {
            let Some(form) = board.view().edit_form().cloned() else {
                return Ok(Err(FlowError::NotEditing));
            };
            let title = console.ask(&format!("title [{}]: ", form.title)).await?;
            let content = console.ask(&format!("content [{}]: ", form.content)).await?;
            if let Some(form) = board.edit_form_mut() {
                keep_or_replace(&mut form.title, title);
                keep_or_replace(&mut form.content, content);
            }
            board.submit_edit().await
        }
        BoardCommand::Cancel => {
            board.cancel_edit();
            Ok(())
        }
        BoardCommand::Delete => {
            // The board re-checks the selection before it reads the answer.
            let confirmed = if board.selection().is_some() {
                console.confirm(DELETE_CONFIRMATION).await?
            } else {
                false
            };
            match board.delete_selected(|_| confirmed).await {
                Ok(DeleteOutcome::NothingSelected) => {
                    println!("No post selected.");
                    Ok(())
                }
                Ok(_) => Ok(()),
                Err(err) => Err(err),
            }
        }
        BoardCommand::Show | BoardCommand::Help | BoardCommand::Quit => Ok(()),
    };
    Ok(outcome)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
    }
    init_tracing(&settings.log_filter);

    let base_url = normalize_base_url(&settings.base_url)?;
    info!(%base_url, "starting post board");

    let (mut board, mut notices) = PostBoard::new(Arc::new(HttpPostStore::new(base_url)));
    let mut console = Console::new();

    let _ = board.display_posts().await;
    print_notices(&mut notices);
    println!("{}", render_board(board.view()));
    println!("type `help` for commands");

    loop {
        let Some(line) = console.ask("> ").await? else {
            break;
        };
        let cmd = match parse_command(&line) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => continue,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };

        match cmd {
            BoardCommand::Quit => break,
            BoardCommand::Help => {
                println!("{HELP}");
                continue;
            }
            _ => {}
        }

        let name = command_name(&cmd);
        debug!(command = name, "running board command");
        if let Err(err) = run_command(&mut board, &mut console, cmd).await? {
            debug!(command = name, error = %err, "board command did not complete");
            if matches!(err, FlowError::NotEditing) {
                println!("Nothing is being edited; run `edit` first.");
            }
        }

        print_notices(&mut notices);
        println!("{}", render_board(board.view()));
    }

    Ok(())
}
