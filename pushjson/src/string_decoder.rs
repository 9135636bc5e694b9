// SPDX-License-Identifier: Apache-2.0

//! Accumulates a string literal one character at a time.
//!
//! All escape state lives in the decoder, so a string can be suspended at any
//! character (including in the middle of `\uXXXX`) and resumed by the next
//! write with the same result as an unsplit write.

use alloc::string::String;
use core::char::REPLACEMENT_CHARACTER;

use crate::anomaly::Anomaly;
use crate::options::SurrogateMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EscapeState {
    None,
    /// Saw `\`, waiting for the escape character.
    Escape,
    /// Inside `\uXXXX`, `digits` hex digits consumed so far.
    Unicode { digits: u8, value: u16 },
}

/// Outcome of feeding one character to the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    /// The string continues.
    Pending,
    /// The closing quote was consumed.
    Complete,
}

#[derive(Debug, Clone)]
pub(crate) struct StringDecoder {
    buffer: String,
    escape: EscapeState,
    /// High surrogate waiting for its low half.
    pending_high: Option<u16>,
    surrogate_mode: SurrogateMode,
}

fn is_high_surrogate(unit: u16) -> bool {
    (0xD800..=0xDBFF).contains(&unit)
}

fn is_low_surrogate(unit: u16) -> bool {
    (0xDC00..=0xDFFF).contains(&unit)
}

fn combine_surrogate_pair(high: u16, low: u16) -> char {
    let codepoint = 0x10000 + ((u32::from(high) & 0x3FF) << 10) + (u32::from(low) & 0x3FF);
    char::from_u32(codepoint).unwrap_or(REPLACEMENT_CHARACTER)
}

impl StringDecoder {
    pub fn new(surrogate_mode: SurrogateMode) -> Self {
        Self {
            buffer: String::new(),
            escape: EscapeState::None,
            pending_high: None,
            surrogate_mode,
        }
    }

    /// Feeds the character following the opening quote, or any later one.
    pub fn push(&mut self, c: char) -> (Step, Option<Anomaly>) {
        match self.escape {
            EscapeState::None => (self.push_unescaped(c), None),
            EscapeState::Escape => {
                self.escape = EscapeState::None;
                let unescaped = match c {
                    '"' => '"',
                    '\\' => '\\',
                    '/' => '/',
                    'b' => '\u{08}',
                    'f' => '\u{0C}',
                    'n' => '\n',
                    'r' => '\r',
                    't' => '\t',
                    'u' => {
                        self.escape = EscapeState::Unicode {
                            digits: 0,
                            value: 0,
                        };
                        return (Step::Pending, None);
                    }
                    _ => {
                        self.flush_high_surrogate();
                        return (Step::Pending, Some(Anomaly::UnknownEscape(c)));
                    }
                };
                self.push_char(unescaped);
                (Step::Pending, None)
            }
            EscapeState::Unicode { digits, value } => match c.to_digit(16) {
                Some(digit) => {
                    // to_digit(16) is at most 15
                    let value = value << 4 | digit as u16;
                    if digits == 3 {
                        self.escape = EscapeState::None;
                        self.push_code_unit(value);
                    } else {
                        self.escape = EscapeState::Unicode {
                            digits: digits + 1,
                            value,
                        };
                    }
                    (Step::Pending, None)
                }
                None => {
                    self.escape = EscapeState::None;
                    (
                        self.push_unescaped(c),
                        Some(Anomaly::InvalidUnicodeEscape(c)),
                    )
                }
            },
        }
    }

    /// Consumes the decoder and returns the decoded text.
    pub fn finish(mut self) -> String {
        self.flush_high_surrogate();
        self.buffer
    }

    fn push_unescaped(&mut self, c: char) -> Step {
        match c {
            '\\' => {
                self.escape = EscapeState::Escape;
                Step::Pending
            }
            '"' => {
                self.flush_high_surrogate();
                Step::Complete
            }
            _ => {
                self.push_char(c);
                Step::Pending
            }
        }
    }

    fn push_char(&mut self, c: char) {
        self.flush_high_surrogate();
        self.buffer.push(c);
    }

    fn push_code_unit(&mut self, unit: u16) {
        if self.surrogate_mode == SurrogateMode::Independent {
            let c = char::from_u32(u32::from(unit)).unwrap_or(REPLACEMENT_CHARACTER);
            self.buffer.push(c);
            return;
        }

        if is_high_surrogate(unit) {
            self.flush_high_surrogate();
            self.pending_high = Some(unit);
        } else if is_low_surrogate(unit) {
            match self.pending_high.take() {
                Some(high) => self.buffer.push(combine_surrogate_pair(high, unit)),
                None => self.buffer.push(REPLACEMENT_CHARACTER),
            }
        } else {
            // Not a surrogate, so always a valid scalar value
            let c = char::from_u32(u32::from(unit)).unwrap_or(REPLACEMENT_CHARACTER);
            self.push_char(c);
        }
    }

    fn flush_high_surrogate(&mut self) {
        if self.pending_high.take().is_some() {
            self.buffer.push(REPLACEMENT_CHARACTER);
        }
    }
}
