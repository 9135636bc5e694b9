// SPDX-License-Identifier: Apache-2.0

//! Prints the events of a JSON document, one per line, as they are parsed.
//!
//! The input is fed to the parser in fixed-size chunks to show that events
//! do not depend on where the chunks break.

use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{debug, info};
use pushjson::{
    Anomaly, Control, Event, NumberMode, ParserOptions, PushHandler, PushParser, SurrogateMode,
};

#[derive(Parser, Debug)]
#[command(name = "json-events", version, about)]
struct Args {
    /// JSON file to read; stdin when omitted
    path: Option<PathBuf>,

    /// Bytes read and written to the parser per chunk
    #[arg(long, default_value_t = 4096, value_parser = clap::value_parser!(u64).range(1..))]
    chunk_size: u64,

    /// Stop after the value following this key
    #[arg(long, value_name = "KEY")]
    stop_at_key: Option<String>,

    /// Fold number digits into a float instead of parsing the text exactly
    #[arg(long)]
    accumulate_numbers: bool,

    /// Replace each surrogate half with U+FFFD instead of combining pairs
    #[arg(long)]
    independent_surrogates: bool,
}

impl Args {
    fn parser_options(&self) -> ParserOptions {
        ParserOptions {
            number_mode: if self.accumulate_numbers {
                NumberMode::Accumulate
            } else {
                NumberMode::Exact
            },
            surrogate_mode: if self.independent_surrogates {
                SurrogateMode::Independent
            } else {
                SurrogateMode::Combine
            },
        }
    }
}

/// Where the printer is relative to the key it is looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Watch {
    Searching,
    /// The key was seen; stop once the value at this depth completes.
    Found { depth: usize },
}

struct EventPrinter {
    stop_at_key: Option<String>,
    watch: Watch,
    event_count: usize,
}

impl EventPrinter {
    fn new(stop_at_key: Option<String>) -> Self {
        Self {
            stop_at_key,
            watch: Watch::Searching,
            event_count: 0,
        }
    }

    fn track_stop_key(&mut self, control: &mut Control, event: &Event<'_>) {
        match (self.watch, event) {
            (Watch::Searching, Event::Key(key)) if self.stop_at_key.as_deref() == Some(*key) => {
                self.watch = Watch::Found {
                    depth: control.depth(),
                };
            }
            // A container value ends when its depth drops back to the key's
            (Watch::Found { depth }, _) if control.depth() == depth => {
                info!("Found the value of {:?}, stopping", self.stop_at_key);
                control.end();
            }
            _ => {}
        }
    }
}

impl PushHandler for EventPrinter {
    type Error = io::Error;

    fn handle_event(&mut self, control: &mut Control, event: Event<'_>) -> Result<(), io::Error> {
        self.event_count += 1;
        let indent = match event {
            Event::StartObject | Event::StartArray => control.depth().saturating_sub(1),
            _ => control.depth(),
        };
        println!("{}{:?}", "  ".repeat(indent), event);
        self.track_stop_key(control, &event);
        Ok(())
    }

    fn handle_anomaly(&mut self, _control: &mut Control, anomaly: &Anomaly) -> Result<(), io::Error> {
        eprintln!("warning: {anomaly}");
        Ok(())
    }
}

/// Decodes the complete UTF-8 in `bytes`, leaving a trailing incomplete
/// sequence in place so the next read can complete it. Invalid bytes are
/// replaced with U+FFFD.
fn decode_chunk(bytes: &mut Vec<u8>) -> String {
    let mut text = String::with_capacity(bytes.len());
    let mut start = 0;
    loop {
        match std::str::from_utf8(&bytes[start..]) {
            Ok(valid) => {
                text.push_str(valid);
                start = bytes.len();
                break;
            }
            Err(e) => {
                let valid_end = start + e.valid_up_to();
                text.push_str(&String::from_utf8_lossy(&bytes[start..valid_end]));
                match e.error_len() {
                    Some(len) => {
                        text.push(char::REPLACEMENT_CHARACTER);
                        start = valid_end + len;
                    }
                    None => {
                        start = valid_end;
                        break;
                    }
                }
            }
        }
    }
    bytes.drain(..start);
    text
}

fn run(args: &Args) -> io::Result<usize> {
    let mut input: Box<dyn Read> = match &args.path {
        Some(path) => Box::new(File::open(path)?),
        None => Box::new(io::stdin().lock()),
    };
    let chunk_size = usize::try_from(args.chunk_size).unwrap_or(usize::MAX);
    let mut buffer = vec![0u8; chunk_size];
    let mut carry = Vec::new();

    let printer = EventPrinter::new(args.stop_at_key.clone());
    let mut parser = PushParser::with_options(printer, args.parser_options());

    while !parser.is_closed() {
        let read = input.read(&mut buffer)?;
        if read == 0 {
            break;
        }
        carry.extend_from_slice(&buffer[..read]);
        let text = decode_chunk(&mut carry);
        debug!("Writing chunk of {} bytes", text.len());
        parser.write(&text)?;
    }

    let rest = (!carry.is_empty()).then(|| String::from_utf8_lossy(&carry).into_owned());
    parser.end(rest.as_deref())?;
    Ok(parser.into_handler().event_count)
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(count) => {
            info!("Printed {count} events");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
