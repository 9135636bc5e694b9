// SPDX-License-Identifier: Apache-2.0

//! Chunk boundary stress tests for PushParser
//!
//! Every scenario is written with a range of chunk patterns and at every
//! possible two- and three-way split. The events must be identical to a
//! single write, no matter where the chunks break.

mod common;

use common::{split_at_chars, OwnedEvent};
use pushjson::{Control, Event, PushHandler, PushParser};
use test_log::test;

/// Handler that compares events immediately as they arrive
struct StressTestHandler<'expected> {
    expected_events: &'expected [OwnedEvent],
    current_index: usize,
}

impl<'expected> StressTestHandler<'expected> {
    fn new(expected_events: &'expected [OwnedEvent]) -> Self {
        Self {
            expected_events,
            current_index: 0,
        }
    }

    fn assert_complete(&self, context: &str) {
        assert_eq!(
            self.current_index,
            self.expected_events.len(),
            "Expected {} events, but only received {} ({context})",
            self.expected_events.len(),
            self.current_index
        );
    }
}

impl PushHandler for StressTestHandler<'_> {
    type Error = String;

    fn handle_event(&mut self, _control: &mut Control, event: Event<'_>) -> Result<(), String> {
        let Some(expected) = self.expected_events.get(self.current_index) else {
            return Err(format!(
                "Received more events than expected, extra event {event:?}"
            ));
        };
        let received = OwnedEvent::from_event(&event);
        if *expected != received {
            return Err(format!(
                "Event mismatch at index {}: expected {expected:?}, got {received:?}",
                self.current_index
            ));
        }
        self.current_index += 1;
        Ok(())
    }
}

/// Writer that delivers text to a PushParser in controlled chunks of chars
struct ChunkedWriter<'a> {
    chars: Vec<char>,
    pos: usize,
    chunk_pattern: &'a [usize],
    pattern_idx: usize,
}

impl<'a> ChunkedWriter<'a> {
    fn new(json: &str, chunk_pattern: &'a [usize]) -> Self {
        Self {
            chars: json.chars().collect(),
            pos: 0,
            chunk_pattern,
            pattern_idx: 0,
        }
    }

    fn run<H: PushHandler>(&mut self, mut parser: PushParser<H>) -> Result<H, H::Error> {
        while self.pos < self.chars.len() {
            let chunk_size = if self.chunk_pattern.is_empty() {
                self.chars.len() - self.pos
            } else {
                let size = self.chunk_pattern[self.pattern_idx].max(1);
                self.pattern_idx = (self.pattern_idx + 1) % self.chunk_pattern.len();
                size
            };

            let end_pos = (self.pos + chunk_size).min(self.chars.len());
            let chunk: String = self.chars[self.pos..end_pos].iter().collect();
            parser.write(&chunk)?;
            self.pos = end_pos;
        }

        parser.end(None)?;
        Ok(parser.into_handler())
    }
}

/// Test scenario configuration
struct TestScenario {
    name: &'static str,
    json: &'static str,
    expected_events: Vec<OwnedEvent>,
}

fn key(k: &str) -> OwnedEvent {
    OwnedEvent::key(k)
}

fn string(s: &str) -> OwnedEvent {
    OwnedEvent::string(s)
}

fn get_push_parser_test_scenarios() -> Vec<TestScenario> {
    use OwnedEvent::{Bool, EndArray, EndObject, Null, Number, StartArray, StartObject};

    vec![
        TestScenario {
            name: "basic_object",
            json: r#"{"hello": "world", "count": 42}"#,
            expected_events: vec![
                StartObject,
                key("hello"),
                string("world"),
                key("count"),
                Number(42.0),
                EndObject,
            ],
        },
        TestScenario {
            name: "empty_strings",
            json: r#"{"": ""}"#,
            expected_events: vec![StartObject, key(""), string(""), EndObject],
        },
        TestScenario {
            name: "long_string",
            json: r#"["abcdefghijklmnopqrstuvwxyz"]"#,
            expected_events: vec![StartArray, string("abcdefghijklmnopqrstuvwxyz"), EndArray],
        },
        TestScenario {
            name: "long_number",
            json: "[123456789012345678901234567890]",
            expected_events: vec![
                StartArray,
                Number("123456789012345678901234567890".parse().unwrap()),
                EndArray,
            ],
        },
        TestScenario {
            name: "number_forms",
            json: "[0, -1, 1.5, -1.5e1, 2E+2, 25e-2]",
            expected_events: vec![
                StartArray,
                Number(0.0),
                Number(-1.0),
                Number(1.5),
                Number(-15.0),
                Number(200.0),
                Number(0.25),
                EndArray,
            ],
        },
        TestScenario {
            name: "top_level_number",
            json: "-12.5e-1",
            expected_events: vec![Number(-1.25)],
        },
        TestScenario {
            name: "top_level_literal",
            json: "false",
            expected_events: vec![Bool(false)],
        },
        TestScenario {
            name: "literals",
            json: r#"{"t":true,"f":false,"n":null}"#,
            expected_events: vec![
                StartObject,
                key("t"),
                Bool(true),
                key("f"),
                Bool(false),
                key("n"),
                Null,
                EndObject,
            ],
        },
        TestScenario {
            name: "deeply_nested_arrays",
            json: "[[[[[[[[[[42]]]]]]]]]]",
            expected_events: (0..10)
                .map(|_| StartArray)
                .chain(std::iter::once(Number(42.0)))
                .chain((0..10).map(|_| EndArray))
                .collect(),
        },
        TestScenario {
            name: "unicode_escapes",
            json: r#"["\u0041\u0042\u0043"]"#,
            expected_events: vec![StartArray, string("ABC"), EndArray],
        },
        TestScenario {
            name: "mixed_escapes",
            json: r#"["a\nb\t\"\\c\u1234d"]"#,
            expected_events: vec![StartArray, string("a\nb\t\"\\c\u{1234}d"), EndArray],
        },
        TestScenario {
            name: "string_ending_with_escape",
            json: r#"["hello\\"]"#,
            expected_events: vec![StartArray, string("hello\\"), EndArray],
        },
        TestScenario {
            name: "surrogate_pair",
            json: r#"{"emoji": "\uD83D\uDE00!"}"#,
            expected_events: vec![StartObject, key("emoji"), string("\u{1F600}!"), EndObject],
        },
        TestScenario {
            name: "multibyte_text",
            json: r#"["héllo wörld", "日本語", "🦀"]"#,
            expected_events: vec![
                StartArray,
                string("héllo wörld"),
                string("日本語"),
                string("🦀"),
                EndArray,
            ],
        },
        TestScenario {
            name: "complex_nested_structure",
            json: r#"{"users": [{"name": "Alice", "age": 30}, {"name": "Bob", "age": 25}]}"#,
            expected_events: vec![
                StartObject,
                key("users"),
                StartArray,
                StartObject,
                key("name"),
                string("Alice"),
                key("age"),
                Number(30.0),
                EndObject,
                StartObject,
                key("name"),
                string("Bob"),
                key("age"),
                Number(25.0),
                EndObject,
                EndArray,
                EndObject,
            ],
        },
    ]
}

fn scenario(name: &str) -> TestScenario {
    get_push_parser_test_scenarios()
        .into_iter()
        .find(|scenario| scenario.name == name)
        .unwrap_or_else(|| panic!("no scenario named {name}"))
}

fn run_chunks(scenario: &TestScenario, chunks: &[&str]) {
    let mut parser = PushParser::new(StressTestHandler::new(&scenario.expected_events));
    for chunk in chunks {
        if let Err(e) = parser.write(chunk) {
            panic!("'{}' split as {chunks:?}: {e}", scenario.name);
        }
    }
    if let Err(e) = parser.end(None) {
        panic!("'{}' split as {chunks:?}: {e}", scenario.name);
    }
    parser
        .into_handler()
        .assert_complete(&format!("'{}' split as {chunks:?}", scenario.name));
}

fn run_pattern(scenario: &TestScenario, chunk_pattern: &[usize]) {
    let handler = StressTestHandler::new(&scenario.expected_events);
    let mut writer = ChunkedWriter::new(scenario.json, chunk_pattern);
    match writer.run(PushParser::new(handler)) {
        Ok(handler) => handler.assert_complete(&format!("{chunk_pattern:?}")),
        Err(e) => panic!(
            "[P={chunk_pattern:?}] UNEXPECTED FAILURE for scenario '{}': {e}",
            scenario.name
        ),
    }
}

fn run_all_two_way_splits(scenario: &TestScenario) {
    let len = scenario.json.chars().count();
    for at in 0..=len {
        run_chunks(scenario, &split_at_chars(scenario.json, &[at]));
    }
}

fn run_all_three_way_splits(scenario: &TestScenario) {
    let len = scenario.json.chars().count();
    for first in 0..=len {
        for second in first..=len {
            run_chunks(scenario, &split_at_chars(scenario.json, &[first, second]));
        }
    }
}

#[test]
fn test_push_parser_stress_chunk_patterns() {
    // Test patterns: Various chunk sizes to stress boundary handling
    let chunk_patterns: &[&[usize]] = &[
        &[],            // Single write
        &[50],          // Large chunks
        &[10],          // Medium chunks
        &[1],           // Char-by-char
        &[2],           // Two chars at a time
        &[3, 1, 2],     // Variable small chunks
        &[1, 5, 1],     // Mixed tiny and small
        &[7, 1, 1, 10], // Irregular pattern
        &[6, 1],        // Splits unicode escapes
    ];

    for scenario in &get_push_parser_test_scenarios() {
        log::info!("Testing scenario: {}", scenario.name);
        for &pattern in chunk_patterns {
            run_pattern(scenario, pattern);
        }
    }
}

#[test]
fn test_empty_chunks_change_nothing() {
    let scenario = scenario("basic_object");
    let json = scenario.json;
    run_chunks(&scenario, &["", json, ""]);
    run_chunks(&scenario, &["", "", &json[..5], "", &json[5..], ""]);
}

macro_rules! generate_split_tests {
    ($($name:ident),*) => {
        $(
            paste::paste! {
                #[test]
                fn [<test_two_way_splits_ $name>]() {
                    run_all_two_way_splits(&scenario(stringify!($name)));
                }

                #[test]
                fn [<test_three_way_splits_ $name>]() {
                    run_all_three_way_splits(&scenario(stringify!($name)));
                }
            }
        )*
    };
}

generate_split_tests!(
    basic_object,
    empty_strings,
    long_string,
    long_number,
    number_forms,
    top_level_number,
    top_level_literal,
    literals,
    deeply_nested_arrays,
    unicode_escapes,
    mixed_escapes,
    string_ending_with_escape,
    surrogate_pair,
    multibyte_text,
    complex_nested_structure
);
