// SPDX-License-Identifier: Apache-2.0

//! A SAX-style JSON push parser.
//!
//! Text is consumed one `char` at a time. Every piece of in-flight state (the
//! container stack, the value being accumulated, escape progress) lives in the
//! parser, so a chunk may end anywhere: inside a string escape, a number or a
//! literal. Splitting the input differently never changes the events.
//!
//! The parser does not validate structure. Malformed input produces some
//! sequence of events and, where the parser had to be lenient, an
//! [`Anomaly`] report, but never a failure.

use log::{debug, trace};

use crate::anomaly::Anomaly;
use crate::container_stack::{ContainerKind, ContainerStack};
use crate::handler::{Control, Event, PushHandler};
use crate::literal_decoder::LiteralDecoder;
use crate::number_decoder::NumberDecoder;
use crate::options::ParserOptions;
use crate::string_decoder::{Step, StringDecoder};

/// The value being accumulated, if any. Its variant doubles as the parser mode.
#[derive(Debug, Default)]
enum PendingValue {
    #[default]
    None,
    String(StringDecoder),
    Number(NumberDecoder),
    Literal(LiteralDecoder),
}

/// An incremental JSON push parser.
///
/// Feed text with [`write`](Self::write) in chunks of any size and finish
/// with [`end`](Self::end). Events are delivered to the handler `H` as soon as
/// each token completes.
///
/// # Examples
///
/// ```rust
/// use pushjson::{Control, Event, PushHandler, PushParser};
///
/// #[derive(Default)]
/// struct Numbers(Vec<f64>);
///
/// impl PushHandler for Numbers {
///     type Error = ();
///
///     fn handle_event(&mut self, _: &mut Control, event: Event<'_>) -> Result<(), ()> {
///         if let Event::Number(n) = event {
///             self.0.push(n);
///         }
///         Ok(())
///     }
/// }
///
/// let mut parser = PushParser::new(Numbers::default());
/// parser.write("[1, 2").unwrap();
/// parser.write("3, -4.5e1]").unwrap();
/// parser.end(None).unwrap();
/// assert_eq!(parser.into_handler().0, vec![1.0, 23.0, -45.0]);
/// ```
#[derive(Debug)]
pub struct PushParser<H> {
    handler: H,
    options: ParserOptions,
    containers: ContainerStack,
    pending: PendingValue,
    /// The next completed string is a key. Only honored inside an object.
    is_object_key: bool,
    /// No more input is accepted.
    closed: bool,
    /// A handler ended the parser; no more events are delivered.
    halted: bool,
}

impl<H: PushHandler> PushParser<H> {
    /// Creates a parser with default [`ParserOptions`].
    pub fn new(handler: H) -> Self {
        Self::with_options(handler, ParserOptions::default())
    }

    /// Creates a parser with the given options.
    pub fn with_options(handler: H, options: ParserOptions) -> Self {
        Self {
            handler,
            options,
            containers: ContainerStack::new(),
            pending: PendingValue::None,
            is_object_key: false,
            closed: false,
            halted: false,
        }
    }

    /// Processes a chunk of input text.
    ///
    /// Does nothing once the parser is closed. A handler error stops
    /// processing of the chunk and is returned as is; the parser stays open.
    pub fn write(&mut self, chunk: &str) -> Result<(), H::Error> {
        if self.closed {
            trace!("Ignoring {} bytes written after close", chunk.len());
            return Ok(());
        }
        for c in chunk.chars() {
            if self.closed {
                break;
            }
            self.process_char(c)?;
        }
        Ok(())
    }

    /// Writes an optional final chunk, then closes the parser.
    ///
    /// A number or literal still pending at the end of input (such as a
    /// top-level `42` or `null`, which have no trailing delimiter) is flushed.
    /// If a handler ended the parser while the final chunk was processed,
    /// nothing is flushed. Calling `end` on a closed parser does nothing.
    pub fn end(&mut self, final_chunk: Option<&str>) -> Result<(), H::Error> {
        if self.closed {
            return Ok(());
        }
        if let Some(chunk) = final_chunk {
            self.write(chunk)?;
            if self.closed {
                return Ok(());
            }
        }
        debug!("Closing parser at depth {}", self.containers.depth());
        self.closed = true;
        self.finish_pending()
    }

    /// Whether the parser accepts no more input.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Current nesting depth.
    pub fn depth(&self) -> usize {
        self.containers.depth()
    }

    /// Borrows the handler.
    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Mutably borrows the handler.
    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    /// Destroys the parser and returns the handler.
    pub fn into_handler(self) -> H {
        self.handler
    }

    fn process_char(&mut self, c: char) -> Result<(), H::Error> {
        match &mut self.pending {
            PendingValue::String(decoder) => {
                let (step, anomaly) = decoder.push(c);
                if let Some(anomaly) = anomaly {
                    self.report(anomaly)?;
                }
                match step {
                    Step::Complete => self.finish_string(),
                    Step::Pending => Ok(()),
                }
            }
            PendingValue::Number(number) => {
                if number.push(c) {
                    return Ok(());
                }
                self.finish_pending()?;
                if self.halted {
                    return Ok(());
                }
                self.dispatch(c)
            }
            PendingValue::None | PendingValue::Literal(_) => self.dispatch(c),
        }
    }

    /// Structural characters, token starts and literal accumulation.
    fn dispatch(&mut self, c: char) -> Result<(), H::Error> {
        match c {
            ' ' | '\t' | '\r' | '\n' => Ok(()),
            '{' => {
                self.finish_pending()?;
                self.containers.push(ContainerKind::Object);
                self.is_object_key = true;
                self.emit(Event::StartObject)
            }
            '[' => {
                self.finish_pending()?;
                self.containers.push(ContainerKind::Array);
                self.emit(Event::StartArray)
            }
            '}' => self.close_container(ContainerKind::Object),
            ']' => self.close_container(ContainerKind::Array),
            '"' => {
                self.finish_pending()?;
                self.pending =
                    PendingValue::String(StringDecoder::new(self.options.surrogate_mode));
                Ok(())
            }
            '-' | '0'..='9' => {
                self.finish_pending()?;
                self.pending = PendingValue::Number(NumberDecoder::new(c));
                Ok(())
            }
            ',' => match self.containers.top() {
                Some(ContainerKind::Object) => {
                    self.finish_pending()?;
                    self.is_object_key = true;
                    Ok(())
                }
                Some(ContainerKind::Array) => self.finish_pending(),
                None => Ok(()),
            },
            ':' => {
                self.finish_pending()?;
                self.is_object_key = false;
                Ok(())
            }
            _ => {
                match &mut self.pending {
                    PendingValue::Literal(literal) => literal.push(c),
                    _ => self.pending = PendingValue::Literal(LiteralDecoder::new(c)),
                }
                Ok(())
            }
        }
    }

    fn close_container(&mut self, kind: ContainerKind) -> Result<(), H::Error> {
        self.finish_pending()?;
        match self.containers.pop() {
            Some(open) if open == kind => {}
            Some(open) => self.report(Anomaly::MismatchedClose {
                open: open.opening(),
                close: kind.closing(),
            })?,
            None => self.report(Anomaly::UnmatchedClose(kind.closing()))?,
        }
        match kind {
            ContainerKind::Object => self.emit(Event::EndObject),
            ContainerKind::Array => self.emit(Event::EndArray),
        }
    }

    fn finish_string(&mut self) -> Result<(), H::Error> {
        let PendingValue::String(decoder) = core::mem::take(&mut self.pending) else {
            return Ok(());
        };
        let text = decoder.finish();
        if self.is_object_key && self.containers.is_object() {
            self.is_object_key = false;
            self.emit(Event::Key(&text))
        } else {
            self.emit(Event::String(&text))
        }
    }

    /// Finalizes whatever value is pending and resets to idle.
    fn finish_pending(&mut self) -> Result<(), H::Error> {
        match core::mem::take(&mut self.pending) {
            PendingValue::None => Ok(()),
            // Strings end at their closing quote; reaching this means input ended inside one
            PendingValue::String(_) => self.report(Anomaly::UnterminatedString),
            PendingValue::Number(number) => {
                let value = number.finish(self.options.number_mode);
                self.emit(Event::Number(value))
            }
            PendingValue::Literal(literal) => match literal.finish() {
                Ok(event) => self.emit(event),
                Err(anomaly) => self.report(anomaly),
            },
        }
    }

    fn emit(&mut self, event: Event<'_>) -> Result<(), H::Error> {
        if self.halted {
            return Ok(());
        }
        trace!("Event {:?} at depth {}", event, self.containers.depth());
        let mut control = Control::new(self.containers.depth(), self.containers.top());
        let result = self.handler.handle_event(&mut control, event);
        self.apply(&control);
        result
    }

    fn report(&mut self, anomaly: Anomaly) -> Result<(), H::Error> {
        if self.halted {
            return Ok(());
        }
        debug!("Tolerating malformed input: {anomaly}");
        let mut control = Control::new(self.containers.depth(), self.containers.top());
        let result = self.handler.handle_anomaly(&mut control, &anomaly);
        self.apply(&control);
        result
    }

    fn apply(&mut self, control: &Control) {
        if control.is_ended() && !self.halted {
            debug!("Handler ended the parser at depth {}", self.containers.depth());
            self.closed = true;
            self.halted = true;
        }
    }
}
