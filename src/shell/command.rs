#[derive(Debug, PartialEq, Eq)]
pub(super) enum Command {
    /// `None` for the starting position, otherwise the layout text.
    SetPosition { layout: Option<String> },
    Legal(String),
    Move(String),
    Moves(String),
    Turn,
    Display,
    Quit,
    Unknown(String),
}

impl Command {
    pub(super) fn parse(input: &str) -> Self {
        let parts: Vec<&str> = input.split_whitespace().collect();
        match parts.as_slice() {
            ["position", "startpos"] => Self::SetPosition { layout: None },
            ["position", "fen", layout @ ..] if !layout.is_empty() => Self::SetPosition {
                layout: Some(layout.join(" ")),
            },
            ["legal", candidate] => Self::Legal((*candidate).to_string()),
            ["move", candidate] => Self::Move((*candidate).to_string()),
            ["moves", square] => Self::Moves((*square).to_string()),
            ["turn"] => Self::Turn,
            ["d"] => Self::Display,
            ["quit"] => Self::Quit,
            _ => Self::Unknown(input.trim().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_position() {
        assert_eq!(
            Command::parse("position startpos"),
            Command::SetPosition { layout: None }
        );
        assert_eq!(
            Command::parse("position fen 4k3/8/8/8/8/8/8/4K3 b\n"),
            Command::SetPosition {
                layout: Some("4k3/8/8/8/8/8/8/4K3 b".to_string())
            }
        );
        assert_eq!(
            Command::parse("position fen"),
            Command::Unknown("position fen".to_string())
        );
        assert_eq!(
            Command::parse("position startpos moves e2e4"),
            Command::Unknown("position startpos moves e2e4".to_string())
        );
    }

    #[test]
    fn parse_moves() {
        assert_eq!(
            Command::parse("legal e2e4"),
            Command::Legal("e2e4".to_string())
        );
        assert_eq!(
            Command::parse("  move   g1f3 "),
            Command::Move("g1f3".to_string())
        );
        assert_eq!(Command::parse("moves b1"), Command::Moves("b1".to_string()));
        assert_eq!(
            Command::parse("move e2e4 e7e5"),
            Command::Unknown("move e2e4 e7e5".to_string())
        );
    }

    #[test]
    fn parse_simple() {
        assert_eq!(Command::parse("turn"), Command::Turn);
        assert_eq!(Command::parse("d\n"), Command::Display);
        assert_eq!(Command::parse("quit"), Command::Quit);
    }

    #[test]
    fn unknown() {
        assert_eq!(
            Command::parse("go depth 10"),
            Command::Unknown("go depth 10".to_string())
        );
        assert_eq!(Command::parse(""), Command::Unknown(String::new()));
    }
}
