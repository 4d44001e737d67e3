//! # Lookup Tables
//!
//! Read-only data the parser consumes:
//! - note spellings → canonical note (`"D♭"` → `"Db"`)
//! - modifier spellings → [`Modifier`] (`"min"` → `minor`)
//! - [`Modifier`] → included / omitted [`Interval`]s
//! - [`Interval`] → semitone offset from the root
//!
//! [`ChordTables::default()`] carries the built-in data. A YAML document can
//! replace or extend it through [`ChordTables::from_yaml()`]:
//!
//! ```yaml
//! notes:            # replaces the built-in note table
//!   C: [C]
//!   Db: [Db, "D♭", C#]
//! modifiers:        # replaces the built-in spelling table
//!   minor: [m, mi, min, "-"]
//!   dominant-7: ["7"]
//! details:          # overrides single entries
//!   sus: { includes: ["4"] }
//! semitones:        # overrides single entries, keys must be quoted
//!   "13": 21
//! ```
//!
//! Spellings in `modifiers` are matched against the normalized descriptor, so
//! they must already be in normalized form (lowercase except `M`, no spaces).

use crate::error::ChordError;
use crate::interval::Interval;
use crate::modifier::{Modifier, ModifierDetail};
use crate::normalize::{normalize_descriptor, LIST_SEPARATOR};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};

use Interval::*;

const NOTE_SPELLINGS: &[(&str, &[&str])] = &[
    ("C", &["C"]),
    ("C#", &["C#", "C♯"]),
    ("Db", &["Db", "D♭"]),
    ("D", &["D"]),
    ("D#", &["D#", "D♯"]),
    ("Eb", &["Eb", "E♭"]),
    ("E", &["E"]),
    ("F", &["F"]),
    ("F#", &["F#", "F♯"]),
    ("Gb", &["Gb", "G♭"]),
    ("G", &["G"]),
    ("G#", &["G#", "G♯"]),
    ("Ab", &["Ab", "A♭"]),
    ("A", &["A"]),
    ("A#", &["A#", "A♯"]),
    ("Bb", &["Bb", "B♭"]),
    ("B", &["B"]),
];

const MODIFIER_SPELLINGS: &[(Modifier, &[&str])] = &[
    (Modifier::Major, &["M", "Ma", "Maj", "ma", "maj", "major", "Major"]),
    (Modifier::Minor, &["m", "mi", "min", "minor", "-"]),
    (Modifier::Augmented, &["+", "aug", "augmented"]),
    (Modifier::Diminished, &["°", "o", "dim"]),
    (Modifier::Diminished7, &["°7", "o7", "dim7"]),
    (Modifier::HalfDiminished, &["ø", "ø7", "m7b5", "mi7b5", "min7b5", "-7b5"]),
    (Modifier::Power, &["5"]),
    (Modifier::Sixth, &["6", "add6"]),
    (Modifier::SixthNinth, &["69", "6/9", "96", "9/6"]),
    (Modifier::Dominant7, &["7", "dom7"]),
    (Modifier::Dominant9, &["9", "dom9"]),
    (Modifier::Dominant11, &["11", "dom11"]),
    (Modifier::Dominant13, &["13", "dom13"]),
    (
        Modifier::Major7,
        &["M7", "Ma7", "Maj7", "ma7", "maj7", "major7", "Major7", "Δ", "Δ7", "△", "△7"],
    ),
    (
        Modifier::Major9,
        &["M9", "Ma9", "Maj9", "ma9", "maj9", "major9", "Major9", "Δ9", "△9"],
    ),
    (
        Modifier::Major11,
        &["M11", "Ma11", "Maj11", "ma11", "maj11", "major11", "Major11", "Δ11", "△11"],
    ),
    (
        Modifier::Major13,
        &["M13", "Ma13", "Maj13", "ma13", "maj13", "major13", "Major13", "Δ13", "△13"],
    ),
    (Modifier::Sus, &["sus", "sus4"]),
    (Modifier::Sus2, &["sus2"]),
    (Modifier::Add2, &["add2"]),
    (Modifier::Add4, &["add4"]),
    (Modifier::Add9, &["add9"]),
    (Modifier::Add11, &["add11"]),
    (Modifier::Add13, &["add13"]),
    (Modifier::FlatFifth, &["b5", "♭5"]),
    (Modifier::SharpFifth, &["#5", "♯5"]),
    (Modifier::FlatNinth, &["b9", "♭9", "addb9", "add♭9"]),
    (Modifier::SharpNinth, &["#9", "♯9", "add#9", "add♯9"]),
    (Modifier::SharpEleventh, &["#11", "♯11", "add#11", "add♯11"]),
    (Modifier::FlatThirteenth, &["b13", "♭13", "addb13", "add♭13"]),
    (Modifier::Omit3, &["no3", "omit3"]),
    (Modifier::Omit5, &["no5", "omit5"]),
];

fn builtin_detail(modifier: Modifier) -> ModifierDetail {
    match modifier {
        Modifier::Major => ModifierDetail::new(&[], &[]),
        Modifier::Minor => ModifierDetail::new(&[FlatThird], &[]),
        Modifier::Augmented => ModifierDetail::new(&[SharpFifth], &[]),
        Modifier::Diminished => ModifierDetail::new(&[FlatThird, FlatFifth], &[]),
        Modifier::Diminished7 => ModifierDetail::new(&[FlatThird, FlatFifth, DoubleFlatSeventh], &[]),
        Modifier::HalfDiminished => ModifierDetail::new(&[FlatThird, FlatFifth, FlatSeventh], &[]),
        Modifier::Power => ModifierDetail::new(&[Fifth], &[FlatThird, Third]),
        Modifier::Sixth => ModifierDetail::new(&[Sixth], &[]),
        Modifier::SixthNinth => ModifierDetail::new(&[Sixth, Ninth], &[]),
        Modifier::Dominant7 => ModifierDetail::new(&[FlatSeventh], &[]),
        Modifier::Dominant9 => ModifierDetail::new(&[FlatSeventh, Ninth], &[]),
        Modifier::Dominant11 => ModifierDetail::new(&[FlatSeventh, Ninth, Eleventh], &[]),
        Modifier::Dominant13 => ModifierDetail::new(&[FlatSeventh, Ninth, Eleventh, Thirteenth], &[]),
        Modifier::Major7 => ModifierDetail::new(&[Seventh], &[]),
        Modifier::Major9 => ModifierDetail::new(&[Seventh, Ninth], &[]),
        Modifier::Major11 => ModifierDetail::new(&[Seventh, Ninth, Eleventh], &[]),
        Modifier::Major13 => ModifierDetail::new(&[Seventh, Ninth, Eleventh, Thirteenth], &[]),
        Modifier::Sus => ModifierDetail::new(&[Fourth], &[]),
        Modifier::Sus2 => ModifierDetail::new(&[Second], &[]),
        Modifier::Add2 => ModifierDetail::new(&[Second], &[]),
        Modifier::Add4 => ModifierDetail::new(&[Fourth], &[]),
        Modifier::Add9 => ModifierDetail::new(&[Ninth], &[]),
        Modifier::Add11 => ModifierDetail::new(&[Eleventh], &[]),
        Modifier::Add13 => ModifierDetail::new(&[Thirteenth], &[]),
        Modifier::FlatFifth => ModifierDetail::new(&[FlatFifth], &[]),
        Modifier::SharpFifth => ModifierDetail::new(&[SharpFifth], &[]),
        Modifier::FlatNinth => ModifierDetail::new(&[FlatNinth], &[]),
        Modifier::SharpNinth => ModifierDetail::new(&[SharpNinth], &[]),
        Modifier::SharpEleventh => ModifierDetail::new(&[SharpEleventh], &[]),
        Modifier::FlatThirteenth => ModifierDetail::new(&[FlatThirteenth], &[]),
        Modifier::Omit3 => ModifierDetail::new(&[], &[FlatThird, Third]),
        Modifier::Omit5 => ModifierDetail::new(&[], &[Fifth]),
    }
}

fn builtin_semitone(interval: Interval) -> u8 {
    match interval {
        Root => 0,
        Second => 2,
        FlatThird => 3,
        Third => 4,
        Fourth => 5,
        FlatFifth => 6,
        Fifth => 7,
        SharpFifth => 8,
        FlatSixth => 8,
        Sixth => 9,
        DoubleFlatSeventh => 9,
        FlatSeventh => 10,
        Seventh => 11,
        FlatNinth => 13,
        Ninth => 14,
        SharpNinth => 15,
        Eleventh => 17,
        SharpEleventh => 18,
        FlatThirteenth => 20,
        Thirteenth => 21,
    }
}

/// Total map from every [`Modifier`] to its [`ModifierDetail`].
#[derive(Debug, Clone, PartialEq)]
pub struct DetailTable {
    entries: Vec<ModifierDetail>,
}

impl DetailTable {
    pub fn get(&self, modifier: Modifier) -> &ModifierDetail {
        &self.entries[modifier.index()]
    }

    fn set(&mut self, modifier: Modifier, detail: ModifierDetail) {
        self.entries[modifier.index()] = detail;
    }
}

impl Default for DetailTable {
    fn default() -> Self {
        Self {
            entries: Modifier::ALL.iter().map(|m| builtin_detail(*m)).collect(),
        }
    }
}

/// Total map from every [`Interval`] to its semitone offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SemitoneTable {
    offsets: [u8; Interval::COUNT],
}

impl SemitoneTable {
    pub fn get(&self, interval: Interval) -> u8 {
        self.offsets[interval.index()]
    }

    fn set(&mut self, interval: Interval, semitones: u8) {
        self.offsets[interval.index()] = semitones;
    }
}

impl Default for SemitoneTable {
    fn default() -> Self {
        let mut offsets = [0; Interval::COUNT];
        for interval in Interval::ALL {
            offsets[interval.index()] = builtin_semitone(interval);
        }
        Self { offsets }
    }
}

/// Tables as written in a YAML document. Every section is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTables {
    notes: Option<BTreeMap<String, Vec<String>>>,
    modifiers: Option<BTreeMap<Modifier, Vec<String>>>,
    details: Option<HashMap<Modifier, ModifierDetail>>,
    semitones: Option<HashMap<Interval, u8>>,
}

/// All lookup data needed to parse chords. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct ChordTables {
    notes: BTreeMap<String, Vec<String>>,
    modifiers: BTreeMap<Modifier, Vec<String>>,
    details: DetailTable,
    semitones: SemitoneTable,
}

impl Default for ChordTables {
    fn default() -> Self {
        let notes = NOTE_SPELLINGS
            .iter()
            .map(|(note, variants)| {
                (note.to_string(), variants.iter().map(|v| v.to_string()).collect())
            })
            .collect();
        let modifiers = MODIFIER_SPELLINGS
            .iter()
            .map(|(modifier, symbols)| {
                (*modifier, symbols.iter().map(|s| s.to_string()).collect())
            })
            .collect();

        Self {
            notes,
            modifiers,
            details: DetailTable::default(),
            semitones: SemitoneTable::default(),
        }
    }
}

impl ChordTables {
    /// Load tables from YAML, falling back to the built-in data for any
    /// missing section. The result is validated.
    pub fn from_yaml(source: &str) -> Result<Self, ChordError> {
        let raw: RawTables = serde_yaml::from_str(source)?;
        let mut tables = ChordTables::default();

        if let Some(notes) = raw.notes {
            tables.notes = notes;
        }
        if let Some(modifiers) = raw.modifiers {
            tables.modifiers = modifiers;
        }
        for (modifier, detail) in raw.details.unwrap_or_default() {
            tables.details.set(modifier, detail);
        }
        for (interval, semitones) in raw.semitones.unwrap_or_default() {
            tables.semitones.set(interval, semitones);
        }

        tables.validate()?;
        Ok(tables)
    }

    /// Check the tables can drive the parser: no empty sections, no empty or
    /// ambiguous spellings, every modifier spelling reachable after
    /// normalization.
    pub fn validate(&self) -> Result<(), ChordError> {
        if self.notes.values().all(|variants| variants.is_empty()) {
            return Err(ChordError::InvalidTables("no note spellings".to_string()));
        }
        let mut seen: HashMap<&str, &str> = HashMap::new();
        for (variant, note) in self.note_spellings() {
            if variant.is_empty() {
                return Err(ChordError::InvalidTables(format!(
                    "empty spelling for note '{}'",
                    note
                )));
            }
            if let Some(other) = seen.insert(variant, note) {
                if other != note {
                    return Err(ChordError::InvalidTables(format!(
                        "note spelling '{}' is claimed by both '{}' and '{}'",
                        variant, other, note
                    )));
                }
            }
        }

        if self.modifiers.values().all(|symbols| symbols.is_empty()) {
            return Err(ChordError::InvalidTables("no modifier spellings".to_string()));
        }
        let mut seen: HashMap<&str, Modifier> = HashMap::new();
        for (symbol, modifier) in self.modifier_spellings() {
            if symbol.is_empty() {
                return Err(ChordError::InvalidTables(format!(
                    "empty spelling for modifier '{}'",
                    modifier
                )));
            }
            let normalized: String = normalize_descriptor(symbol)
                .chars()
                .filter(|c| !c.is_whitespace() && *c != LIST_SEPARATOR)
                .collect();
            if normalized != symbol {
                return Err(ChordError::InvalidTables(format!(
                    "modifier spelling '{}' normalizes to '{}' and can never match",
                    symbol, normalized
                )));
            }
            if let Some(other) = seen.insert(symbol, modifier) {
                if other != modifier {
                    return Err(ChordError::InvalidTables(format!(
                        "modifier spelling '{}' is claimed by both '{}' and '{}'",
                        symbol, other, modifier
                    )));
                }
            }
        }

        Ok(())
    }

    /// Every accepted note spelling with its canonical note, as `(variant, note)`.
    pub fn note_spellings(&self) -> impl Iterator<Item = (&str, &str)> {
        self.notes.iter().flat_map(|(note, variants)| {
            variants.iter().map(move |v| (v.as_str(), note.as_str()))
        })
    }

    /// Every accepted modifier spelling with its modifier, as `(symbol, modifier)`.
    pub fn modifier_spellings(&self) -> impl Iterator<Item = (&str, Modifier)> {
        self.modifiers.iter().flat_map(|(modifier, symbols)| {
            symbols.iter().map(move |s| (s.as_str(), *modifier))
        })
    }

    pub fn detail(&self, modifier: Modifier) -> &ModifierDetail {
        self.details.get(modifier)
    }

    pub fn semitone(&self, interval: Interval) -> u8 {
        self.semitones.get(interval)
    }

    pub fn semitones(&self) -> &SemitoneTable {
        &self.semitones
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tables_are_valid() {
        ChordTables::default().validate().unwrap();
    }

    #[test]
    fn test_every_modifier_has_a_spelling() {
        let tables = ChordTables::default();
        for modifier in Modifier::ALL {
            assert!(
                tables.modifier_spellings().any(|(_, m)| m == modifier),
                "no spelling for {}",
                modifier
            );
        }
    }

    #[test]
    fn test_unicode_accidentals_resolve() {
        let tables = ChordTables::default();
        let lookup: HashMap<&str, &str> = tables.note_spellings().collect();
        assert_eq!(lookup["D♭"], "Db");
        assert_eq!(lookup["F♯"], "F#");
        assert_eq!(lookup["C"], "C");
    }

    #[test]
    fn test_semitones_ascend_with_degree() {
        let tables = ChordTables::default();
        assert_eq!(tables.semitone(Interval::Root), 0);
        assert_eq!(tables.semitone(Interval::FlatThird), 3);
        assert_eq!(tables.semitone(Interval::Thirteenth), 21);
        assert!(tables.semitone(Interval::Seventh) < tables.semitone(Interval::FlatNinth));
    }

    #[test]
    fn test_yaml_overrides_single_entries() {
        let yaml = r#"
details:
  sus:
    includes: ["4", "9"]
semitones:
  "13": 9
"#;
        let tables = ChordTables::from_yaml(yaml).unwrap();
        assert_eq!(
            tables.detail(Modifier::Sus),
            &ModifierDetail::new(&[Interval::Fourth, Interval::Ninth], &[])
        );
        assert_eq!(tables.semitone(Interval::Thirteenth), 9);
        // untouched entries keep the built-in values
        assert_eq!(tables.detail(Modifier::Minor).includes, vec![Interval::FlatThird]);
        assert_eq!(tables.semitone(Interval::Ninth), 14);
    }

    #[test]
    fn test_yaml_replaces_spelling_sections() {
        let yaml = r#"
notes:
  C: [C, Do]
modifiers:
  minor: [m]
"#;
        let tables = ChordTables::from_yaml(yaml).unwrap();
        let notes: Vec<_> = tables.note_spellings().collect();
        assert_eq!(notes, vec![("C", "C"), ("Do", "C")]);
        let symbols: Vec<_> = tables.modifier_spellings().collect();
        assert_eq!(symbols, vec![("m", Modifier::Minor)]);
    }

    #[test]
    fn test_yaml_rejects_unknown_section() {
        let result = ChordTables::from_yaml("voicings: {}");
        assert!(matches!(result, Err(ChordError::Yaml(_))));
    }

    #[test]
    fn test_yaml_rejects_unknown_modifier() {
        let result = ChordTables::from_yaml("modifiers:\n  lydian: [lyd]\n");
        assert!(matches!(result, Err(ChordError::Yaml(_))));
    }

    #[test]
    fn test_rejects_ambiguous_modifier_spelling() {
        let yaml = r#"
modifiers:
  minor: [m]
  major: [m]
"#;
        let err = ChordTables::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, ChordError::InvalidTables(_)));
        assert!(err.to_string().contains("'m'"));
    }

    #[test]
    fn test_rejects_ambiguous_note_spelling() {
        let yaml = r#"
notes:
  C#: ["C#"]
  Db: ["C#"]
"#;
        assert!(matches!(
            ChordTables::from_yaml(yaml),
            Err(ChordError::InvalidTables(_))
        ));
    }

    #[test]
    fn test_rejects_unreachable_spelling() {
        let yaml = r#"
modifiers:
  major-7: [MAJ7]
"#;
        let err = ChordTables::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("can never match"));
    }

    #[test]
    fn test_rejects_empty_sections() {
        assert!(matches!(
            ChordTables::from_yaml("notes: {}"),
            Err(ChordError::InvalidTables(_))
        ));
        assert!(matches!(
            ChordTables::from_yaml("modifiers:\n  minor: []\n"),
            Err(ChordError::InvalidTables(_))
        ));
    }
}
