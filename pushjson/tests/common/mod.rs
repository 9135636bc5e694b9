// SPDX-License-Identifier: Apache-2.0

//! Shared helpers for the integration tests.
#![allow(dead_code)]

use pushjson::{Anomaly, Control, Event, ParserOptions, PushHandler, PushParser};

/// Owned event representation for comparison
#[derive(Debug, Clone, PartialEq)]
pub enum OwnedEvent {
    StartObject,
    EndObject,
    StartArray,
    EndArray,
    Key(String),
    String(String),
    Number(f64),
    Bool(bool),
    Null,
}

impl OwnedEvent {
    pub fn from_event(event: &Event) -> Self {
        match *event {
            Event::StartObject => OwnedEvent::StartObject,
            Event::EndObject => OwnedEvent::EndObject,
            Event::StartArray => OwnedEvent::StartArray,
            Event::EndArray => OwnedEvent::EndArray,
            Event::Key(k) => OwnedEvent::Key(k.to_string()),
            Event::String(s) => OwnedEvent::String(s.to_string()),
            Event::Number(n) => OwnedEvent::Number(n),
            Event::Bool(b) => OwnedEvent::Bool(b),
            Event::Null => OwnedEvent::Null,
        }
    }

    pub fn key(k: &str) -> Self {
        OwnedEvent::Key(k.to_string())
    }

    pub fn string(s: &str) -> Self {
        OwnedEvent::String(s.to_string())
    }
}

/// Handler that records every event and anomaly
#[derive(Debug, Default)]
pub struct EventCollector {
    pub events: Vec<OwnedEvent>,
    pub anomalies: Vec<Anomaly>,
}

impl PushHandler for EventCollector {
    type Error = ();

    fn handle_event(&mut self, _control: &mut Control, event: Event<'_>) -> Result<(), ()> {
        self.events.push(OwnedEvent::from_event(&event));
        Ok(())
    }

    fn handle_anomaly(&mut self, _control: &mut Control, anomaly: &Anomaly) -> Result<(), ()> {
        self.anomalies.push(anomaly.clone());
        Ok(())
    }
}

/// Writes every chunk, ends the parser and returns the recorded events.
pub fn parse_chunks_with(chunks: &[&str], options: ParserOptions) -> EventCollector {
    let mut parser = PushParser::with_options(EventCollector::default(), options);
    for chunk in chunks {
        parser.write(chunk).unwrap();
    }
    parser.end(None).unwrap();
    parser.into_handler()
}

pub fn parse_chunks(chunks: &[&str]) -> Vec<OwnedEvent> {
    parse_chunks_with(chunks, ParserOptions::default()).events
}

pub fn parse(json: &str) -> Vec<OwnedEvent> {
    parse_chunks(&[json])
}

/// Splits `json` at the given character offsets.
pub fn split_at_chars<'a>(json: &'a str, offsets: &[usize]) -> Vec<&'a str> {
    let mut boundaries: Vec<usize> = offsets
        .iter()
        .map(|&offset| {
            json.char_indices()
                .nth(offset)
                .map_or(json.len(), |(index, _)| index)
        })
        .collect();
    boundaries.sort_unstable();

    let mut chunks = Vec::with_capacity(boundaries.len() + 1);
    let mut start = 0;
    for end in boundaries {
        chunks.push(&json[start..end]);
        start = end;
    }
    chunks.push(&json[start..]);
    chunks
}
