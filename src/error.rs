use std::fmt;

use crate::model::Size;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Layout(LayoutError),
    Backend(String),
    InputFormat(String),
}

/// Failures of the layout calculator. Fatal to the one sheet being computed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LayoutError {
    /// A single cell does not fit inside the area left after margins.
    TooLarge { cell: Size, available: Size },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::TooLarge { cell, available } => write!(
                f,
                "label dimensions {:.1}x{:.1}pt are too large for the printable area {:.1}x{:.1}pt",
                cell.width, cell.height, available.width, available.height
            ),
        }
    }
}

impl std::error::Error for LayoutError {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {e}"),
            Error::Layout(e) => write!(f, "layout error: {e}"),
            Error::Backend(msg) => write!(f, "PDF backend error: {msg}"),
            Error::InputFormat(msg) => write!(f, "invalid input: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Layout(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LayoutError> for Error {
    fn from(e: LayoutError) -> Self {
        Error::Layout(e)
    }
}
