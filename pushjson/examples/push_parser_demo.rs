// SPDX-License-Identifier: Apache-2.0

// Example demonstrating PushParser with SAX-style event handling

use pushjson::{Control, Event, PushHandler, PushParser};

/// A simple event handler that prints JSON events as they arrive
struct JsonEventPrinter {
    event_count: usize,
}

impl JsonEventPrinter {
    fn new() -> Self {
        Self { event_count: 0 }
    }
}

impl PushHandler for JsonEventPrinter {
    type Error = std::convert::Infallible;

    fn handle_event(&mut self, control: &mut Control, event: Event<'_>) -> Result<(), Self::Error> {
        self.event_count += 1;
        let indent = match event {
            Event::StartObject | Event::StartArray => control.depth() - 1,
            _ => control.depth(),
        };
        let indent = "  ".repeat(indent);

        match event {
            Event::StartObject => println!("{indent}🏁 StartObject"),
            Event::EndObject => println!("{indent}🏁 EndObject"),
            Event::StartArray => println!("{indent}📋 StartArray"),
            Event::EndArray => println!("{indent}📋 EndArray"),
            Event::Key(key) => println!("{indent}🔑 Key: '{key}'"),
            Event::String(s) => println!("{indent}📝 String: '{s}'"),
            Event::Number(num) => println!("{indent}🔢 Number: {num}"),
            Event::Bool(b) => println!("{indent}✅ Bool: {b}"),
            Event::Null => println!("{indent}⭕ Null"),
        }
        Ok(())
    }
}

fn main() -> Result<(), std::convert::Infallible> {
    println!("🚀 PushParser Demo - SAX-style JSON Processing");
    println!("===============================================");
    println!();

    // Chunks break inside strings, an escape and a number
    let json_chunks = [
        r#"{"name": "push"#,
        r#"json", "version": 1."#,
        r#"5, "features": ["chunked", "no_std""#,
        r#", "zero\u0041lloc"], "escapes": "hello\"#,
        r#"nworld", "nested": {"data": [1, 2.5, true, null]}}"#,
    ];

    println!("📄 Input JSON: {}", json_chunks.concat());
    println!(
        "📦 Processing in {} chunks (simulates streaming)",
        json_chunks.len()
    );
    println!();

    let mut parser = PushParser::new(JsonEventPrinter::new());

    for (i, chunk) in json_chunks.iter().enumerate() {
        println!("📨 Processing chunk {}: {:?}", i + 1, chunk);
        // Events are handled immediately
        parser.write(chunk)?;
        println!();
    }

    println!("🔚 Finishing parsing...");
    parser.end(None)?;
    let handler = parser.into_handler();

    println!();
    println!(
        "✅ Successfully processed {} events with PushParser!",
        handler.event_count
    );

    Ok(())
}
