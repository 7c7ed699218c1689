//! Commands typed at the board prompt.

use shared::domain::PostId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardCommand {
    List,
    Open(PostId),
    New,
    Edit,
    Save,
    Cancel,
    Delete,
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command '{0}'; type `help` for the list")]
    Unknown(String),
    #[error("`open` needs a post id, e.g. `open 3`")]
    MissingId,
}

pub const HELP: &str = "\
commands:
  list         reload posts and select the first one
  open <id>    show a post
  new          create a post (prompts for title, content, author)
  edit         open the edit form for the shown post
  save         submit the edit form (empty input keeps a field)
  cancel       close the edit form
  delete       delete the shown post
  show         redraw the board
  help         this text
  quit         leave";

/// Blank lines parse to `None`.
pub fn parse_command(line: &str) -> Result<Option<BoardCommand>, CommandError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };

    let cmd = match head.to_ascii_lowercase().as_str() {
        "list" | "ls" | "refresh" => BoardCommand::List,
        "open" | "select" => {
            let id = words.next().ok_or(CommandError::MissingId)?;
            BoardCommand::Open(PostId::from(id))
        }
        "new" | "create" => BoardCommand::New,
        "edit" => BoardCommand::Edit,
        "save" => BoardCommand::Save,
        "cancel" => BoardCommand::Cancel,
        "delete" | "rm" => BoardCommand::Delete,
        "show" => BoardCommand::Show,
        "help" | "?" => BoardCommand::Help,
        "quit" | "exit" | "q" => BoardCommand::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(cmd))
}

pub fn command_name(cmd: &BoardCommand) -> &'static str {
    match cmd {
        BoardCommand::List => "list",
        BoardCommand::Open(_) => "open",
        BoardCommand::New => "new",
        BoardCommand::Edit => "edit",
        BoardCommand::Save => "save",
        BoardCommand::Cancel => "cancel",
        BoardCommand::Delete => "delete",
        BoardCommand::Show => "show",
        BoardCommand::Help => "help",
        BoardCommand::Quit => "quit",
    }
}
