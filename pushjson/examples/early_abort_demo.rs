// SPDX-License-Identifier: Apache-2.0

// Stops the parser from inside a callback once the wanted value is found,
// without reading the rest of the document.

use std::cell::{Cell, RefCell};

use pushjson::{Callbacks, PushParser};

fn main() -> Result<(), std::convert::Infallible> {
    let stream = [
        r#"{"status": "ok", "request_id": "#,
        r#""a1b2c3", "items": ["#,
        r#"{"id": 1}, {"id": 2}"#,
        r#", {"id": 3}]}"#,
    ];

    let want_value = Cell::new(false);
    let request_id = RefCell::new(None);
    let callbacks = Callbacks::new()
        .on_key(|_, key| want_value.set(key == "request_id"))
        .on_string(|control, value| {
            if want_value.get() {
                *request_id.borrow_mut() = Some(value.to_owned());
                control.end();
            }
        });

    let mut parser = PushParser::new(callbacks);
    for (i, chunk) in stream.iter().enumerate() {
        if parser.is_closed() {
            println!("Parser closed, skipping the remaining {} chunks", stream.len() - i);
            break;
        }
        parser.write(chunk)?;
    }
    parser.end(None)?;
    drop(parser);

    println!("request_id = {:?}", request_id.borrow());
    Ok(())
}
