use core::fmt::Display;
use std::sync::Arc;

pub type Result<T> = std::result::Result<T, Error>;

/// Ways a block of art can fail to form a rectangular frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Malformed {
    /// No art lines left after dropping surrounding blank lines.
    Empty,
    /// First row has nothing between its borders.
    ZeroWidth,
    /// Row does not start and end with the border character.
    MissingBorder { row: usize },
    /// Row width differs from the width of row 0.
    WidthMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },
}

impl Malformed {
    /// Row the problem was found on, if it is tied to one.
    pub fn row(&self) -> Option<usize> {
        match self {
            Malformed::Empty => None,
            Malformed::ZeroWidth => Some(0),
            Malformed::MissingBorder { row } => Some(*row),
            Malformed::WidthMismatch { row, .. } => Some(*row),
        }
    }
}

impl Display for Malformed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Malformed::Empty => write!(f, "no art lines found"),
            Malformed::ZeroWidth => write!(f, "row 0 is empty after border stripping"),
            Malformed::MissingBorder { row } => {
                write!(f, "row {} is not enclosed in border characters", row)
            }
            Malformed::WidthMismatch {
                row,
                expected,
                found,
            } => write!(
                f,
                "row {} is {} cells wide, expected {}",
                row, found, expected
            ),
        }
    }
}

/// Errors that can occur while compiling sprites.
#[derive(Debug, Clone)]
pub enum Error {
    /// Art block does not describe a valid rectangular frame.
    MalformedFrame(Malformed),

    /// Character that cannot be placed in a sprite cell.
    DisallowedChar { row: usize, column: usize, code: u32 },

    /// Encoded row does not cover exactly the frame width.
    /// Signals a bug in the encoder, never bad input.
    EncodingInvariant {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Failed to convert string to single character (invalid length).
    StrToCharConversion(usize),

    /// Invalid configuration.
    Config(String),

    /// Expected sprite title but got something else.
    BlockExpected(String),
    /// Duplicate sprite title.
    BlockDup(String),

    /// Error inside a named sprite of a sheet.
    Sprite { name: String, source: Box<Error> },

    /// I/O error occurred.
    Io(Arc<std::io::Error>),
}

impl Error {
    /// Row of the art the error points at, if any.
    pub fn row(&self) -> Option<usize> {
        match self {
            Error::MalformedFrame(m) => m.row(),
            Error::DisallowedChar { row, .. } => Some(*row),
            Error::EncodingInvariant { row, .. } => Some(*row),
            Error::Sprite { source, .. } => source.row(),
            _ => None,
        }
    }
}

impl From<Malformed> for Error {
    fn from(m: Malformed) -> Self {
        Self::MalformedFrame(m)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.into())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::MalformedFrame(m) => write!(f, "malformed frame: {}", m),
            Error::DisallowedChar { row, column, code } => write!(
                f,
                "disallowed char with code {:#x} at row {}, column {}",
                code, row, column
            ),
            Error::EncodingInvariant {
                row,
                expected,
                found,
            } => write!(
                f,
                "encoded row {} covers {} cells instead of {}",
                row, found, expected
            ),
            Error::StrToCharConversion(ln) => {
                write!(f, "cannot convert str with length {} to single char", ln)
            }
            Error::Config(msg) => write!(f, "invalid config: {}", msg),
            Error::BlockExpected(line) => write!(f, "sprite title expected, got: {}", line),
            Error::BlockDup(name) => write!(f, "sprite {} duplicated", name),
            Error::Sprite { name, source } => write!(f, "sprite {}: {}", name, source),
            Error::Io(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Sprite { source, .. } => Some(source.as_ref()),
            Error::Io(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}
