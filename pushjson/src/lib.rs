// SPDX-License-Identifier: Apache-2.0

//! An incremental push JSON parser.
//!
//! JSON text is fed in chunks of any size, split at any character, and
//! structural and value events are delivered to a handler as soon as each
//! token completes. Nothing is buffered beyond the token in progress and no
//! document tree is built. A handler can stop the parser once it has seen
//! what it needs, via [`Control::end`].
//!
//! ```rust
//! use std::cell::Cell;
//! use pushjson::{Callbacks, PushParser};
//!
//! let found = Cell::new(None);
//! let next_is_id = Cell::new(false);
//! let callbacks = Callbacks::new()
//!     .on_key(|_, key| next_is_id.set(key == "id"))
//!     .on_number(|control, value| {
//!         if next_is_id.get() {
//!             found.set(Some(value));
//!             control.end();
//!         }
//!     });
//! let mut parser = PushParser::new(callbacks);
//! parser.write(r#"{"name": "x", "id": 4"#).unwrap();
//! parser.write(r#"2, "tail": [1, 2, 3]}"#).unwrap();
//! parser.end(None).unwrap();
//! assert!(parser.is_closed());
//! assert_eq!(found.get(), Some(42.0));
//! ```

#![cfg_attr(not(test), no_std)]

extern crate alloc;

mod anomaly;
pub use anomaly::Anomaly;

mod container_stack;
pub use container_stack::ContainerKind;

mod handler;
pub use handler::{Callbacks, Control, Event, PushHandler};

mod literal_decoder;

mod number_decoder;

mod options;
pub use options::{NumberMode, ParserOptions, SurrogateMode};

mod push_parser;
pub use push_parser::PushParser;

mod string_decoder;
