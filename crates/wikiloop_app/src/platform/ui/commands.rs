use wikiloop_core::FieldId;

pub const HELP: &str = "\
Commands:
  start <url>   set the Wikipedia starting page (empty clears it)
  stop <url>    set the Wikipedia goal page (empty clears it)
  go            compute the path
  help          show this list
  quit          leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Edit { field: FieldId, text: String },
    Submit,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command `{0}`, type `help` for the list")]
    Unknown(String),
    #[error("`{0}` takes no argument")]
    UnexpectedArgument(String),
}

/// Parses one input line. Blank lines yield `None`.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "start" => Command::Edit {
            field: FieldId::Start,
            text: rest.to_string(),
        },
        "stop" => Command::Edit {
            field: FieldId::Stop,
            text: rest.to_string(),
        },
        "go" | "compute" => no_argument(word, rest, Command::Submit)?,
        "help" | "?" => no_argument(word, rest, Command::Help)?,
        "quit" | "exit" => no_argument(word, rest, Command::Quit)?,
        _ => return Err(CommandError::Unknown(word.to_string())),
    };
    Ok(Some(command))
}

fn no_argument(word: &str, rest: &str, command: Command) -> Result<Command, CommandError> {
    if rest.is_empty() {
        Ok(command)
    } else {
        Err(CommandError::UnexpectedArgument(word.to_string()))
    }
}
