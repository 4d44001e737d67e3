//! # Chord Assembler
//!
//! Splits a chord symbol into root, descriptor and bass note, then runs the
//! descriptor through normalizer → matcher → resolver and assembles a
//! [`Chord`].
//!
//! ## Input Shape
//! ```text
//! <note spelling><descriptor>[/<note spelling>]
//!   "Dm7b5/F"  → root D, descriptor "m7b5", bass F
//!   "C6/9"     → root C, descriptor "6/9" (9 is not a note)
//!   "E"        → root E, no descriptor: a major triad
//! ```
//! The descriptor is matched lazily, so a trailing `/<note>` is always read
//! as the bass note rather than as part of the descriptor.
//!
//! ## Failure
//! A chord is either fully resolved or rejected. An unknown root, an
//! unexplained character in the descriptor, or a descriptor that matches no
//! modifier all reject the whole input.

use crate::error::ChordError;
use crate::interval::Interval;
use crate::matcher::SymbolMatcher;
use crate::modifier::Modifier;
use crate::normalize::normalize_descriptor;
use crate::resolver::resolve;
use crate::tables::ChordTables;
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, trace};

/// A parsed chord symbol.
///
/// # Fields
/// - `input`: the text that was parsed
/// - `root_note` / `bass_note`: canonical note names (`"D♭"` → `"Db"`)
/// - `descriptor`: raw text between root and bass note, if any
/// - `parsable_descriptor`: the descriptor after normalization
/// - `modifiers`: matched modifiers in order of appearance
/// - `intervals`: unique, ascending by semitone
/// - `semitones`: offsets from the root, index-aligned with `intervals`
///
/// Serializes with camelCase keys (`rootNote`, `bassNote`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Chord {
    pub input: String,
    pub root_note: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bass_note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descriptor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parsable_descriptor: Option<String>,
    pub modifiers: Vec<Modifier>,
    pub intervals: Vec<Interval>,
    pub semitones: Vec<u8>,
}

impl Chord {
    pub fn has_interval(&self, interval: Interval) -> bool {
        self.intervals.contains(&interval)
    }

    pub fn has_modifier(&self, modifier: Modifier) -> bool {
        self.modifiers.contains(&modifier)
    }
}

/// Parser bound to one set of [`ChordTables`].
///
/// Building it validates the tables and compiles the note pattern and the
/// symbol table once; parsing afterwards only reads them, so one parser can
/// be shared across threads.
///
/// # Example
/// ```rust
/// use chord_symbol::{ChordParser, ChordTables};
///
/// let parser = ChordParser::new(ChordTables::default())?;
/// let chord = parser.parse("Dm7b5/F").unwrap();
/// assert_eq!(chord.root_note, "D");
/// assert_eq!(chord.bass_note.as_deref(), Some("F"));
/// assert_eq!(chord.intervals, ["1", "b3", "b5", "b7"]);
/// # Ok::<(), chord_symbol::ChordError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ChordParser {
    tables: ChordTables,
    notes: HashMap<String, String>,
    note_pattern: Regex,
    matcher: SymbolMatcher,
}

impl ChordParser {
    pub fn new(tables: ChordTables) -> Result<Self, ChordError> {
        tables.validate()?;

        let notes: HashMap<String, String> = tables
            .note_spellings()
            .map(|(variant, note)| (variant.to_string(), note.to_string()))
            .collect();

        // Longest spelling first: "A#" must be tried before "A".
        let mut variants: Vec<&str> = notes.keys().map(String::as_str).collect();
        variants.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        let alternation = variants
            .iter()
            .map(|v| regex::escape(v))
            .collect::<Vec<_>>()
            .join("|");
        let note_pattern = Regex::new(&format!(r"^({alt})(.*?)(/({alt}))?$", alt = alternation))?;

        let matcher = SymbolMatcher::new(&tables);

        Ok(Self {
            tables,
            notes,
            note_pattern,
            matcher,
        })
    }

    pub fn tables(&self) -> &ChordTables {
        &self.tables
    }

    /// Parse a chord symbol, or `None` if it is not a chord.
    pub fn parse(&self, input: &str) -> Option<Chord> {
        match self.try_parse(input) {
            Ok(chord) => Some(chord),
            Err(e) => {
                debug!(input, reason = %e, "not a chord");
                None
            }
        }
    }

    /// Parse a chord symbol, reporting why it was rejected.
    pub fn try_parse(&self, input: &str) -> Result<Chord, ChordError> {
        let unknown_root = || ChordError::UnknownRoot {
            input: input.to_string(),
        };

        let caps = self.note_pattern.captures(input).ok_or_else(unknown_root)?;
        let root_note = self.canonical_note(&caps[1]).ok_or_else(unknown_root)?;
        let bass_note = match caps.get(4) {
            Some(bass) => Some(self.canonical_note(bass.as_str()).ok_or_else(unknown_root)?),
            None => None,
        };
        let descriptor = caps
            .get(2)
            .map(|m| m.as_str())
            .filter(|d| !d.is_empty());

        let (parsable_descriptor, modifiers) = match descriptor {
            Some(descriptor) => {
                let parsable = normalize_descriptor(descriptor);
                trace!(descriptor, parsable = %parsable, "normalized descriptor");
                let modifiers = self.matcher.match_modifiers(&parsable)?;
                (Some(parsable), modifiers)
            }
            None => (None, Vec::new()),
        };

        let resolution = resolve(&modifiers, &self.tables);

        Ok(Chord {
            input: input.to_string(),
            root_note,
            bass_note,
            descriptor: descriptor.map(str::to_string),
            parsable_descriptor,
            modifiers,
            intervals: resolution.intervals,
            semitones: resolution.semitones,
        })
    }

    fn canonical_note(&self, variant: &str) -> Option<String> {
        self.notes.get(variant).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> ChordParser {
        ChordParser::new(ChordTables::default()).unwrap()
    }

    #[test]
    fn test_root_only() {
        let chord = parser().parse("C").unwrap();
        assert_eq!(chord.root_note, "C");
        assert_eq!(chord.bass_note, None);
        assert_eq!(chord.descriptor, None);
        assert_eq!(chord.parsable_descriptor, None);
        assert!(chord.modifiers.is_empty());
        assert_eq!(chord.intervals, ["1", "3", "5"]);
        assert_eq!(chord.semitones, [0, 4, 7]);
    }

    #[test]
    fn test_longest_root_spelling_is_preferred() {
        let parser = parser();
        assert_eq!(parser.parse("A#m").unwrap().root_note, "A#");
        assert_eq!(parser.parse("Bbmaj7").unwrap().root_note, "Bb");
        assert_eq!(parser.parse("B♭").unwrap().root_note, "Bb");
        assert_eq!(parser.parse("Bm").unwrap().root_note, "B");
    }

    #[test]
    fn test_bass_note_split() {
        let parser = parser();
        let chord = parser.parse("Dm7b5/F").unwrap();
        assert_eq!(chord.root_note, "D");
        assert_eq!(chord.bass_note.as_deref(), Some("F"));
        assert_eq!(chord.descriptor.as_deref(), Some("m7b5"));

        let slash_only = parser.parse("C/E♭").unwrap();
        assert_eq!(slash_only.bass_note.as_deref(), Some("Eb"));
        assert_eq!(slash_only.descriptor, None);
        assert_eq!(slash_only.intervals, ["1", "3", "5"]);
    }

    #[test]
    fn test_slash_that_is_not_a_bass_note() {
        let chord = parser().parse("C6/9").unwrap();
        assert_eq!(chord.bass_note, None);
        assert_eq!(chord.descriptor.as_deref(), Some("6/9"));
        assert_eq!(chord.modifiers, vec![Modifier::SixthNinth]);
    }

    #[test]
    fn test_rejections_carry_reasons() {
        let parser = parser();
        assert!(matches!(parser.try_parse("Hm7"), Err(ChordError::UnknownRoot { .. })));
        assert!(matches!(parser.try_parse(""), Err(ChordError::UnknownRoot { .. })));
        assert!(matches!(
            parser.try_parse("Cxyz"),
            Err(ChordError::UnmatchedDescriptor { .. })
        ));
        assert!(matches!(parser.try_parse("C "), Err(ChordError::NoModifiers { .. })));
        assert!(parser.parse("C/X").is_none());
    }

    #[test]
    fn test_custom_tables() {
        let tables = ChordTables::from_yaml(
            r#"
notes:
  C: [C, Do]
  G: [G, Sol]
modifiers:
  minor: [m]
"#,
        )
        .unwrap();
        let parser = ChordParser::new(tables).unwrap();
        let chord = parser.parse("Dom/Sol").unwrap();
        assert_eq!(chord.root_note, "C");
        assert_eq!(chord.bass_note.as_deref(), Some("G"));
        assert_eq!(chord.intervals, ["1", "b3", "5"]);
        assert!(parser.parse("Cm7").is_none());
    }

    #[test]
    fn test_serializes_camel_case() {
        let chord = parser().parse("Am/C").unwrap();
        let json = serde_json::to_value(&chord).unwrap();
        assert_eq!(json["rootNote"], "A");
        assert_eq!(json["bassNote"], "C");
        assert_eq!(json["parsableDescriptor"], "m");
        assert_eq!(json["modifiers"], serde_json::json!(["minor"]));
        assert_eq!(json["intervals"], serde_json::json!(["1", "b3", "5"]));
        assert_eq!(json["semitones"], serde_json::json!([0, 3, 7]));

        let bare = serde_json::to_value(parser().parse("A").unwrap()).unwrap();
        assert!(bare.get("bassNote").is_none());
        assert!(bare.get("descriptor").is_none());
    }
}
