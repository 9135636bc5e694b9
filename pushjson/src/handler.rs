// SPDX-License-Identifier: Apache-2.0

//! Events, the handler trait, and the closure-based [`Callbacks`] handler.

use alloc::boxed::Box;
use core::convert::Infallible;

use crate::anomaly::Anomaly;
use crate::container_stack::ContainerKind;

/// Events produced by the push parser.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event<'a> {
    /// The start of an object (`{`).
    StartObject,
    /// The end of an object (`}`).
    EndObject,
    /// The start of an array (`[`).
    StartArray,
    /// The end of an array (`]`).
    EndArray,
    /// An object key, unescaped.
    Key(&'a str),
    /// A string value, unescaped.
    String(&'a str),
    /// A number value.
    Number(f64),
    /// A boolean value.
    Bool(bool),
    /// A null value.
    Null,
}

/// Handed to every handler call; lets the handler stop the parser.
#[derive(Debug)]
pub struct Control {
    depth: usize,
    container: Option<ContainerKind>,
    end_requested: bool,
}

impl Control {
    pub(crate) fn new(depth: usize, container: Option<ContainerKind>) -> Self {
        Self {
            depth,
            container,
            end_requested: false,
        }
    }

    /// Ends the parser from inside a handler.
    ///
    /// The parser closes as soon as the handler returns: the rest of the
    /// current chunk is discarded, no further events are delivered and any
    /// value still being accumulated is dropped instead of flushed.
    pub fn end(&mut self) {
        self.end_requested = true;
    }

    /// Whether [`end`](Self::end) has been called during this handler call.
    pub fn is_ended(&self) -> bool {
        self.end_requested
    }

    /// Nesting depth after the event took effect. `StartObject` at the top
    /// level reports 1, its matching `EndObject` reports 0.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The innermost open container after the event took effect.
    pub fn container(&self) -> Option<ContainerKind> {
        self.container
    }
}

/// A trait for handling events from the push parser.
///
/// Errors returned by a handler propagate out of
/// [`PushParser::write`](crate::PushParser::write) or
/// [`PushParser::end`](crate::PushParser::end) unchanged.
pub trait PushHandler {
    /// The error type handlers may fail with.
    type Error;

    /// Handles a single, complete JSON event.
    fn handle_event(&mut self, control: &mut Control, event: Event<'_>)
        -> Result<(), Self::Error>;

    /// Handles malformed input the parser tolerated. Ignored by default.
    fn handle_anomaly(
        &mut self,
        control: &mut Control,
        anomaly: &Anomaly,
    ) -> Result<(), Self::Error> {
        let _ = (control, anomaly);
        Ok(())
    }
}

impl<H: PushHandler + ?Sized> PushHandler for &mut H {
    type Error = H::Error;

    fn handle_event(
        &mut self,
        control: &mut Control,
        event: Event<'_>,
    ) -> Result<(), Self::Error> {
        (**self).handle_event(control, event)
    }

    fn handle_anomaly(
        &mut self,
        control: &mut Control,
        anomaly: &Anomaly,
    ) -> Result<(), Self::Error> {
        (**self).handle_anomaly(control, anomaly)
    }
}

type UnitCallback<'cb> = Box<dyn FnMut(&mut Control) + 'cb>;
type TextCallback<'cb> = Box<dyn FnMut(&mut Control, &str) + 'cb>;

/// A handler built from independent closures, one per event kind.
///
/// Every closure starts out as a no-op, so only the events of interest need
/// to be set.
///
/// # Examples
///
/// ```rust
/// use std::cell::RefCell;
/// use pushjson::{Callbacks, PushParser};
///
/// let output = RefCell::new(String::new());
/// let callbacks = Callbacks::new()
///     .on_object_start(|_| output.borrow_mut().push_str("Here we go...\n"))
///     .on_key(|_, key| output.borrow_mut().push_str(&format!("Got a key: {key}\n")))
///     .on_string(|_, value| output.borrow_mut().push_str(&format!("Got a value: {value}\n")));
/// let mut parser = PushParser::new(callbacks);
/// parser.write(r#"{"hel"#).unwrap();
/// parser.write(r#"lo": "world"}"#).unwrap();
/// parser.end(None).unwrap();
/// assert_eq!(
///     *output.borrow(),
///     "Here we go...\nGot a key: hello\nGot a value: world\n"
/// );
/// ```
pub struct Callbacks<'cb> {
    object_start: UnitCallback<'cb>,
    object_end: UnitCallback<'cb>,
    array_start: UnitCallback<'cb>,
    array_end: UnitCallback<'cb>,
    key: TextCallback<'cb>,
    string: TextCallback<'cb>,
    number: Box<dyn FnMut(&mut Control, f64) + 'cb>,
    boolean: Box<dyn FnMut(&mut Control, bool) + 'cb>,
    null: UnitCallback<'cb>,
    anomaly: Box<dyn FnMut(&mut Control, &Anomaly) + 'cb>,
}

impl<'cb> Callbacks<'cb> {
    /// Creates a handler whose callbacks all do nothing.
    pub fn new() -> Self {
        Self {
            object_start: Box::new(|_| {}),
            object_end: Box::new(|_| {}),
            array_start: Box::new(|_| {}),
            array_end: Box::new(|_| {}),
            key: Box::new(|_, _| {}),
            string: Box::new(|_, _| {}),
            number: Box::new(|_, _| {}),
            boolean: Box::new(|_, _| {}),
            null: Box::new(|_| {}),
            anomaly: Box::new(|_, _| {}),
        }
    }

    /// Called for `{`.
    pub fn on_object_start(mut self, f: impl FnMut(&mut Control) + 'cb) -> Self {
        self.object_start = Box::new(f);
        self
    }

    /// Called for `}`.
    pub fn on_object_end(mut self, f: impl FnMut(&mut Control) + 'cb) -> Self {
        self.object_end = Box::new(f);
        self
    }

    /// Called for `[`.
    pub fn on_array_start(mut self, f: impl FnMut(&mut Control) + 'cb) -> Self {
        self.array_start = Box::new(f);
        self
    }

    /// Called for `]`.
    pub fn on_array_end(mut self, f: impl FnMut(&mut Control) + 'cb) -> Self {
        self.array_end = Box::new(f);
        self
    }

    /// Called with each object key.
    pub fn on_key(mut self, f: impl FnMut(&mut Control, &str) + 'cb) -> Self {
        self.key = Box::new(f);
        self
    }

    /// Called with each string value.
    pub fn on_string(mut self, f: impl FnMut(&mut Control, &str) + 'cb) -> Self {
        self.string = Box::new(f);
        self
    }

    /// Called with each number value.
    pub fn on_number(mut self, f: impl FnMut(&mut Control, f64) + 'cb) -> Self {
        self.number = Box::new(f);
        self
    }

    /// Called for `true` and `false`.
    pub fn on_boolean(mut self, f: impl FnMut(&mut Control, bool) + 'cb) -> Self {
        self.boolean = Box::new(f);
        self
    }

    /// Called for `null`.
    pub fn on_null(mut self, f: impl FnMut(&mut Control) + 'cb) -> Self {
        self.null = Box::new(f);
        self
    }

    /// Called for tolerated malformed input.
    pub fn on_anomaly(mut self, f: impl FnMut(&mut Control, &Anomaly) + 'cb) -> Self {
        self.anomaly = Box::new(f);
        self
    }
}

impl Default for Callbacks<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for Callbacks<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Callbacks").finish_non_exhaustive()
    }
}

impl PushHandler for Callbacks<'_> {
    type Error = Infallible;

    fn handle_event(
        &mut self,
        control: &mut Control,
        event: Event<'_>,
    ) -> Result<(), Self::Error> {
        match event {
            Event::StartObject => (self.object_start)(control),
            Event::EndObject => (self.object_end)(control),
            Event::StartArray => (self.array_start)(control),
            Event::EndArray => (self.array_end)(control),
            Event::Key(key) => (self.key)(control, key),
            Event::String(value) => (self.string)(control, value),
            Event::Number(value) => (self.number)(control, value),
            Event::Bool(value) => (self.boolean)(control, value),
            Event::Null => (self.null)(control),
        }
        Ok(())
    }

    fn handle_anomaly(
        &mut self,
        control: &mut Control,
        anomaly: &Anomaly,
    ) -> Result<(), Self::Error> {
        (self.anomaly)(control, anomaly);
        Ok(())
    }
}
