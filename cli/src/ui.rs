//! Command parsing and rendering for the terminal front-end.

use std::io::{self, Write};

use todo_core::TodoApp;

pub const HELP: &str = "\
commands:
  title <text>   set the title (of the item being edited, else of the new item)
  desc <text>    set the description (same target as title)
  add            submit the new item
  edit <n>       edit item n
  save           save the item being edited
  cancel         leave edit mode
  delete <n>     delete item n (asks for confirmation)
  dismiss        clear both messages
  list           redraw the list
  help           show this text
  quit           exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Title(String),
    Desc(String),
    Add,
    Edit(usize),
    Save,
    Cancel,
    Delete(usize),
    Dismiss,
    List,
    Help,
    Quit,
}

/// Parse one input line. Item numbers are 1-based as displayed; the returned
/// index is 0-based.
pub fn parse(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word {
        "title" => Ok(Command::Title(rest.to_string())),
        "desc" | "description" => Ok(Command::Desc(rest.to_string())),
        "add" | "submit" => Ok(Command::Add),
        "edit" => index(rest).map(Command::Edit),
        "save" => Ok(Command::Save),
        "cancel" => Ok(Command::Cancel),
        "delete" | "rm" => index(rest).map(Command::Delete),
        "dismiss" => Ok(Command::Dismiss),
        "list" | "ls" | "" => Ok(Command::List),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        other => Err(format!("unknown command: {other} (try `help`)")),
    }
}

fn index(arg: &str) -> Result<usize, String> {
    match arg.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n - 1),
        _ => Err(format!("expected an item number, got `{arg}`")),
    }
}

pub fn render<W: Write>(app: &TodoApp, out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Add Item")?;
    writeln!(out, "  title: {}", app.draft().title)?;
    writeln!(out, "  desc:  {}", app.draft().description)?;

    if let Some(notice) = app.error() {
        writeln!(out, "[error] {}", notice.text)?;
    }
    if let Some(notice) = app.success() {
        writeln!(out, "[ok] {}", notice.text)?;
    }

    writeln!(out)?;
    writeln!(out, "Tasks")?;
    if app.todos().is_empty() {
        writeln!(out, "  (none)")?;
    }
    let editing = app.editing();
    for (n, todo) in app.todos().iter().enumerate() {
        match editing.filter(|e| e.id == todo.id) {
            Some(edit) => {
                writeln!(out, "{:>3}. * {}  [editing]", n + 1, edit.draft.title)?;
                writeln!(out, "       {}", edit.draft.description)?;
            }
            None => {
                writeln!(out, "{:>3}. {}", n + 1, todo.title)?;
                writeln!(out, "     {}", todo.description)?;
            }
        }
    }
    Ok(())
}
