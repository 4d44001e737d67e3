pub mod chord;
pub mod error;
pub mod interval;
pub mod matcher;
pub mod modifier;
pub mod normalize;
pub mod resolver;
pub mod tables;

pub use chord::{Chord, ChordParser};
pub use error::*;
pub use interval::{has_none_of, Interval};
pub use matcher::{Scan, SymbolMatcher};
pub use modifier::{Modifier, ModifierDetail};
pub use normalize::normalize_descriptor;
pub use resolver::{has_major_intent, resolve, Resolution};
pub use tables::ChordTables;

use once_cell::sync::Lazy;

static DEFAULT_PARSER: Lazy<ChordParser> = Lazy::new(|| {
    ChordParser::new(ChordTables::default()).expect("built-in chord tables are valid")
});

/// Parser over the built-in tables, built on first use.
pub fn default_parser() -> &'static ChordParser {
    &DEFAULT_PARSER
}

/// Parse a chord symbol with the built-in tables.
/// This is the main entry point for the library.
///
/// ```rust
/// use chord_symbol::parse_chord;
///
/// let chord = parse_chord("Cmaj7").unwrap();
/// assert_eq!(chord.intervals, ["1", "3", "5", "7"]);
/// assert!(parse_chord("Cxyz").is_none());
/// ```
pub fn parse_chord(input: &str) -> Option<Chord> {
    DEFAULT_PARSER.parse(input)
}

/// Like [`parse_chord`], but says why an input is not a chord.
pub fn try_parse_chord(input: &str) -> Result<Chord, ChordError> {
    DEFAULT_PARSER.try_parse(input)
}
