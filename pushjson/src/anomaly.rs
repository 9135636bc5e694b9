// SPDX-License-Identifier: Apache-2.0

use alloc::string::String;

/// Malformed input the parser tolerated.
///
/// The parser never fails on bad input. Each leniency is reported once through
/// [`PushHandler::handle_anomaly`](crate::PushHandler::handle_anomaly), which
/// ignores it by default, and parsing carries on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Anomaly {
    /// A backslash escape with an unknown character (e.g. `\x`). Nothing is
    /// appended to the string.
    UnknownEscape(char),
    /// A non-hexadecimal character inside a `\uXXXX` escape. The escape is
    /// abandoned and the character is treated as ordinary string content.
    InvalidUnicodeEscape(char),
    /// A bare word that is not `true`, `false` or `null`. Holds at most the
    /// first five characters of the word.
    UnknownLiteral(String),
    /// A closing bracket with no open container.
    UnmatchedClose(char),
    /// A closing bracket that does not match the innermost open container.
    MismatchedClose {
        /// Opening character of the container that was closed.
        open: char,
        /// The closing character that was seen.
        close: char,
    },
    /// Input ended inside a string. The partial string is dropped.
    UnterminatedString,
}

impl core::fmt::Display for Anomaly {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Anomaly::UnknownEscape(c) => write!(f, "unknown escape sequence '\\{c}'"),
            Anomaly::InvalidUnicodeEscape(c) => {
                write!(f, "invalid hex digit {c:?} in unicode escape")
            }
            Anomaly::UnknownLiteral(text) => write!(f, "unknown literal {text:?}"),
            Anomaly::UnmatchedClose(c) => write!(f, "'{c}' without an open container"),
            Anomaly::MismatchedClose { open, close } => {
                write!(f, "'{close}' closes a container opened with '{open}'")
            }
            Anomaly::UnterminatedString => write!(f, "input ended inside a string"),
        }
    }
}

impl core::error::Error for Anomaly {}
