use crate::router::Route;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Switch view, e.g. `:go /status` or `:status`
    Go(Route),
    Next,
    Prev,
    Submit,
    /// Fill the status checker with one of the sample identifiers (1-based)
    Sample(usize),
    /// `:set <field> <value>`; the field name is resolved by the caller
    Set(String, String),
    Listen,
    Stop,
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    Unknown(String),

    #[error("{0}")]
    BadArgument(String),
}

pub fn parse_command(input: &str) -> Result<Command, CommandError> {
    let input = input.trim();
    let mut parts = input.splitn(2, ' ');
    let cmd = parts.next().unwrap_or("");
    let arg = parts.next().map(str::trim).filter(|a| !a.is_empty());

    match cmd {
        "home" => Ok(Command::Go(Route::Home)),
        "enroll" | "enrollment" | "e" => Ok(Command::Go(Route::Enrollment)),
        "update" | "u" => Ok(Command::Go(Route::Update)),
        "status" | "st" => Ok(Command::Go(Route::Status)),
        "story" => Ok(Command::Go(Route::Story)),
        "go" => {
            let path = arg.ok_or_else(|| CommandError::BadArgument("go needs a path".to_string()))?;
            Route::from_path(path)
                .map(Command::Go)
                .map_err(|e| CommandError::BadArgument(e.to_string()))
        }
        "next" | "n" => Ok(Command::Next),
        "prev" | "p" => Ok(Command::Prev),
        "submit" | "w" | "check" => Ok(Command::Submit),
        "sample" => {
            let n = arg
                .and_then(|a| a.parse::<usize>().ok())
                .ok_or_else(|| CommandError::BadArgument("sample needs a number".to_string()))?;
            Ok(Command::Sample(n))
        }
        "set" => {
            let (field, value) = arg
                .and_then(|a| a.split_once(' '))
                .ok_or_else(|| CommandError::BadArgument("set needs a field and a value".to_string()))?;
            Ok(Command::Set(field.to_string(), value.trim().to_string()))
        }
        "listen" | "play" => Ok(Command::Listen),
        "stop" => Ok(Command::Stop),
        "help" | "h" | "?" => Ok(Command::Help),
        "q" | "quit" | "exit" => Ok(Command::Quit),
        "" => Err(CommandError::Unknown("empty command".to_string())),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}
