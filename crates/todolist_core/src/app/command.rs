//! Menu command codes.

/// One menu entry, keyed by the first character of an input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Today,
    Week,
    All,
    Missed,
    Add,
    Delete,
    Exit,
}

impl Command {
    /// Parses the first character of `line`. Unknown or empty input yields `None`.
    pub fn parse(line: &str) -> Option<Self> {
        match line.chars().next()? {
            '1' => Some(Self::Today),
            '2' => Some(Self::Week),
            '3' => Some(Self::All),
            '4' => Some(Self::Missed),
            '5' => Some(Self::Add),
            '6' => Some(Self::Delete),
            '0' => Some(Self::Exit),
            _ => None,
        }
    }

    pub fn code(self) -> char {
        match self {
            Self::Today => '1',
            Self::Week => '2',
            Self::All => '3',
            Self::Missed => '4',
            Self::Add => '5',
            Self::Delete => '6',
            Self::Exit => '0',
        }
    }
}
