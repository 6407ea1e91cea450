use thiserror::Error;

pub const HELP: &str = "\
commands:
  search <place>   set the origin from a place name and list nearby spots
  gps              set the origin from the device position
  select <n>       show fish and weather cards for spot n of the list
  go               route from the origin to the selected spot
  back             return to the previous screen
  status           redraw the current screen
  help             show this text
  quit             exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Raw query text; blank text is passed through so the flow reports it.
    Search(String),
    Gps,
    /// Zero-based index into the displayed list.
    Select(usize),
    Go,
    Back,
    Status,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown command {0:?}, try `help`")]
    Unknown(String),
    #[error("select needs a spot number")]
    MissingIndex,
    #[error("spot numbers start at 1, got {0:?}")]
    BadIndex(String),
}

impl Command {
    /// Parses one input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Command>, ParseError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((w, r)) => (w, r.trim()),
            None => (line, ""),
        };
        let cmd = match word.to_ascii_lowercase().as_str() {
            "search" | "s" => Command::Search(rest.to_string()),
            "gps" | "locate" => Command::Gps,
            "select" | "pick" => Command::Select(parse_index(rest)?),
            "go" => Command::Go,
            "back" | "b" => Command::Back,
            "status" | "ls" => Command::Status,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(ParseError::Unknown(other.to_string())),
        };
        Ok(Some(cmd))
    }
}

fn parse_index(text: &str) -> Result<usize, ParseError> {
    if text.is_empty() {
        return Err(ParseError::MissingIndex);
    }
    match text.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(ParseError::BadIndex(text.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::{Command, ParseError};

    #[test]
    fn parses_search_with_multiword_place() {
        assert_eq!(
            Command::parse("  search   New York ").unwrap(),
            Some(Command::Search("New York".into()))
        );
        assert_eq!(
            Command::parse("search").unwrap(),
            Some(Command::Search(String::new()))
        );
    }

    #[test]
    fn select_is_one_based() {
        assert_eq!(Command::parse("select 1").unwrap(), Some(Command::Select(0)));
        assert_eq!(Command::parse("SELECT 12").unwrap(), Some(Command::Select(11)));
        assert_eq!(
            Command::parse("select 0"),
            Err(ParseError::BadIndex("0".into()))
        );
        assert_eq!(Command::parse("select"), Err(ParseError::MissingIndex));
        assert_eq!(
            Command::parse("select two"),
            Err(ParseError::BadIndex("two".into()))
        );
    }

    #[test]
    fn blank_and_unknown_lines() {
        assert_eq!(Command::parse("   ").unwrap(), None);
        assert_eq!(
            Command::parse("fly away"),
            Err(ParseError::Unknown("fly".into()))
        );
        assert_eq!(Command::parse("q").unwrap(), Some(Command::Quit));
    }
}
