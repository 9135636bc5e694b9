// SPDX-License-Identifier: Apache-2.0

use alloc::string::String;

use crate::anomaly::Anomaly;
use crate::handler::Event;

/// Longest literal worth remembering; anything longer cannot be `false`.
const MAX_LITERAL_LEN: usize = 5;

/// Collects a bare word until a delimiter ends it.
#[derive(Debug, Clone, Default)]
pub(crate) struct LiteralDecoder {
    text: String,
    len: usize,
}

impl LiteralDecoder {
    pub fn new(first: char) -> Self {
        let mut literal = Self::default();
        literal.push(first);
        literal
    }

    pub fn push(&mut self, c: char) {
        if self.len < MAX_LITERAL_LEN {
            self.text.push(c);
        }
        self.len = self.len.saturating_add(1);
    }

    /// Resolves the word to its event, or hands back the rejected prefix.
    pub fn finish(self) -> Result<Event<'static>, Anomaly> {
        if self.len > MAX_LITERAL_LEN {
            return Err(Anomaly::UnknownLiteral(self.text));
        }
        match self.text.as_str() {
            "null" => Ok(Event::Null),
            "true" => Ok(Event::Bool(true)),
            "false" => Ok(Event::Bool(false)),
            _ => Err(Anomaly::UnknownLiteral(self.text)),
        }
    }
}
