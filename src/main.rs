use chord_symbol::{Chord, ChordParser, ChordTables};
use std::env;
use std::fs;
use std::io::{self, BufRead};
use std::process;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: chord-symbol [--json] [--tables <tables.yaml>] [CHORD ...]
       (reads one chord per line from stdin when no CHORD is given)";

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();
}

fn describe(chord: &Chord) -> String {
    let join = |items: Vec<String>| items.join(" ");
    let mut line = format!("{}: root={}", chord.input, chord.root_note);
    if let Some(bass) = &chord.bass_note {
        line.push_str(&format!(" bass={}", bass));
    }
    line.push_str(&format!(
        " modifiers=[{}] intervals=[{}] semitones=[{}]",
        join(chord.modifiers.iter().map(|m| m.to_string()).collect()),
        join(chord.intervals.iter().map(|i| i.to_string()).collect()),
        join(chord.semitones.iter().map(|s| s.to_string()).collect()),
    ));
    line
}

fn main() {
    init_tracing();

    let args: Vec<String> = env::args().skip(1).collect();

    let mut json = false;
    let mut tables_path: Option<String> = None;
    let mut chords: Vec<String> = Vec::new();

    // Parse flags
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--json" => json = true,
            "--tables" => match iter.next() {
                Some(path) => tables_path = Some(path),
                None => {
                    eprintln!("{}", USAGE);
                    process::exit(1);
                }
            },
            "-h" | "--help" => {
                println!("{}", USAGE);
                return;
            }
            _ => chords.push(arg),
        }
    }

    // Load tables
    let tables = match &tables_path {
        Some(path) => {
            let source = match fs::read_to_string(path) {
                Ok(content) => content,
                Err(e) => {
                    eprintln!("Error reading tables '{}': {}", path, e);
                    process::exit(1);
                }
            };
            match ChordTables::from_yaml(&source) {
                Ok(tables) => tables,
                Err(e) => {
                    eprintln!("Error loading tables '{}': {}", path, e);
                    process::exit(1);
                }
            }
        }
        None => ChordTables::default(),
    };

    let parser = match ChordParser::new(tables) {
        Ok(parser) => parser,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if chords.is_empty() {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) if !line.trim().is_empty() => chords.push(line.trim().to_string()),
                Ok(_) => {}
                Err(e) => {
                    eprintln!("Error reading stdin: {}", e);
                    process::exit(1);
                }
            }
        }
    }

    let mut failed = false;
    for input in &chords {
        match parser.try_parse(input) {
            Ok(chord) if json => match serde_json::to_string(&chord) {
                Ok(line) => println!("{}", line),
                Err(e) => {
                    eprintln!("Error serializing '{}': {}", input, e);
                    failed = true;
                }
            },
            Ok(chord) => println!("{}", describe(&chord)),
            Err(e) => {
                failed = true;
                if json {
                    println!("null");
                } else {
                    println!("{}: not a chord: {}", input, e);
                }
            }
        }
    }

    if failed {
        process::exit(1);
    }
}
