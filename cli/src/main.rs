//! Interactive terminal client for the todo service.

use std::io::{self, BufRead, Write};
use std::time::Instant;

use todo_cli::transport::Transport;
use todo_cli::ui::{self, Command};
use todo_core::{TodoApp, TodoClient};
use tracing_subscriber::EnvFilter;

const DEFAULT_API_URL: &str = "http://localhost:8000";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let base_url = std::env::var("TODO_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
    let transport = Transport::new();
    let mut app = TodoApp::new(TodoClient::new(&base_url));

    let load = app.load();
    app.apply(load.intent, transport.execute(load.request));

    let mut stdout = io::stdout();
    let mut lines = io::stdin().lock().lines();
    ui::render(&app, &mut stdout)?;

    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        app.expire_notices(Instant::now());

        let command = match ui::parse(&line) {
            Ok(command) => command,
            Err(message) => {
                writeln!(stdout, "{message}")?;
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => {
                writeln!(stdout, "{}", ui::HELP)?;
                continue;
            }
            Command::Title(text) => match app.edit_draft_mut() {
                Some(draft) => draft.title = text,
                None => app.draft_mut().title = text,
            },
            Command::Desc(text) => match app.edit_draft_mut() {
                Some(draft) => draft.description = text,
                None => app.draft_mut().description = text,
            },
            Command::Add => match app.submit() {
                Some(outbound) => app.apply(outbound.intent, transport.execute(outbound.request)),
                None => writeln!(stdout, "title and description are both required")?,
            },
            Command::Edit(n) => match app.todos().get(n).map(|t| t.id.clone()) {
                Some(id) => {
                    app.begin_edit(&id);
                }
                None => writeln!(stdout, "no item {}", n + 1)?,
            },
            Command::Save => match app.save_edit() {
                Some(outbound) => app.apply(outbound.intent, transport.execute(outbound.request)),
                None if app.editing().is_none() => writeln!(stdout, "nothing is being edited")?,
                None => writeln!(stdout, "title and description are both required")?,
            },
            Command::Cancel => app.cancel_edit(),
            Command::Delete(n) => {
                let Some(id) = app.todos().get(n).map(|t| t.id.clone()) else {
                    writeln!(stdout, "no item {}", n + 1)?;
                    continue;
                };
                let confirmed = |_: &todo_core::Todo| confirm(&mut stdout, &mut lines);
                if let Some(outbound) = app.request_delete(&id, confirmed) {
                    app.apply(outbound.intent, transport.execute(outbound.request));
                }
            }
            Command::Dismiss => {
                app.dismiss_error();
                app.dismiss_success();
            }
            Command::List => {}
        }

        ui::render(&app, &mut stdout)?;
    }

    Ok(())
}

/// Ask before deleting. Anything but an explicit yes, including a read
/// failure, declines.
fn confirm<W, L>(out: &mut W, lines: &mut L) -> bool
where
    W: Write,
    L: Iterator<Item = io::Result<String>>,
{
    if write!(out, "Are you sure want to delete? [y/N] ")
        .and_then(|_| out.flush())
        .is_err()
    {
        return false;
    }
    matches!(
        lines.next(),
        Some(Ok(answer)) if matches!(answer.trim(), "y" | "Y" | "yes")
    )
}
