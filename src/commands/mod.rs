use std::str::FromStr;
use thiserror::Error;

pub mod help;
pub mod memory;

/// One line of player input.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Command {
    Start,
    Restart,
    /// Raw label; resolving (and falling back) happens when the board is dealt.
    Difficulty(String),
    /// Zero-based board position.
    Reveal(usize),
    Board,
    Status,
    Best,
    Help,
    Quit,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command `{0}`")]
    Unknown(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    #[error("`{0}` is not a tile number")]
    InvalidPosition(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Err(CommandError::Unknown(String::new()));
        };
        let argument = words.next();
        let name = name.to_ascii_lowercase();

        match name.as_str() {
            "start" | "s" => Ok(Command::Start),
            "restart" | "r" | "new" => Ok(Command::Restart),
            "easy" | "hard" => Ok(Command::Difficulty(name.clone())),
            "difficulty" | "d" | "level" => argument
                .map(|label| Command::Difficulty(label.to_string()))
                .ok_or(CommandError::MissingArgument("difficulty")),
            "flip" | "reveal" | "f" => {
                let argument = argument.ok_or(CommandError::MissingArgument("flip"))?;
                parse_position(argument).map(Command::Reveal)
            }
            "board" | "b" => Ok(Command::Board),
            "status" | "info" => Ok(Command::Status),
            "best" | "scores" => Ok(Command::Best),
            "help" | "h" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            _ if name.starts_with(|c: char| c.is_ascii_digit()) => {
                parse_position(&name).map(Command::Reveal)
            }
            _ => Err(CommandError::Unknown(name.clone())),
        }
    }
}

/// Players count tiles from 1.
fn parse_position(raw: &str) -> Result<usize, CommandError> {
    raw.parse::<usize>()
        .ok()
        .and_then(|number| number.checked_sub(1))
        .ok_or_else(|| CommandError::InvalidPosition(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Result<Command, CommandError> {
        line.parse()
    }

    #[test]
    fn session_commands() {
        assert_eq!(parse("start"), Ok(Command::Start));
        assert_eq!(parse("  RESTART "), Ok(Command::Restart));
        assert_eq!(parse("new"), Ok(Command::Restart));
        assert_eq!(parse("status"), Ok(Command::Status));
        assert_eq!(parse("board"), Ok(Command::Board));
        assert_eq!(parse("best"), Ok(Command::Best));
        assert_eq!(parse("?"), Ok(Command::Help));
        assert_eq!(parse("exit"), Ok(Command::Quit));
    }

    #[test]
    fn difficulty_commands_keep_the_raw_label() {
        assert_eq!(parse("hard"), Ok(Command::Difficulty("hard".into())));
        assert_eq!(
            parse("difficulty Expert"),
            Ok(Command::Difficulty("Expert".into()))
        );
        assert_eq!(
            parse("difficulty"),
            Err(CommandError::MissingArgument("difficulty"))
        );
    }

    #[test]
    fn reveal_positions_are_one_based() {
        assert_eq!(parse("flip 1"), Ok(Command::Reveal(0)));
        assert_eq!(parse("reveal 12"), Ok(Command::Reveal(11)));
        assert_eq!(parse("7"), Ok(Command::Reveal(6)));
        assert_eq!(parse("flip"), Err(CommandError::MissingArgument("flip")));
        assert_eq!(parse("0"), Err(CommandError::InvalidPosition("0".into())));
        assert_eq!(
            parse("flip x"),
            Err(CommandError::InvalidPosition("x".into()))
        );
        assert_eq!(parse("3b"), Err(CommandError::InvalidPosition("3b".into())));
    }

    #[test]
    fn garbage_is_rejected() {
        assert_eq!(parse("dance"), Err(CommandError::Unknown("dance".into())));
        assert_eq!(parse(""), Err(CommandError::Unknown(String::new())));
    }
}
