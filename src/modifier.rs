//! Chord modifiers: the canonical qualities, extensions, alterations,
//! additions and omissions a descriptor can be made of.

use crate::interval::Interval;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical modifier id. Spellings ("m", "min", "-") resolve to one of
/// these through [`crate::tables::ChordTables::modifiers`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Modifier {
    // Qualities
    #[serde(rename = "major")]
    Major,
    #[serde(rename = "minor")]
    Minor,
    #[serde(rename = "augmented")]
    Augmented,
    #[serde(rename = "diminished")]
    Diminished,
    #[serde(rename = "diminished-7")]
    Diminished7,
    #[serde(rename = "half-diminished")]
    HalfDiminished,
    #[serde(rename = "power")]
    Power,

    // Sixths
    #[serde(rename = "sixth")]
    Sixth,
    #[serde(rename = "sixth-ninth")]
    SixthNinth,

    // Extensions
    #[serde(rename = "dominant-7")]
    Dominant7,
    #[serde(rename = "dominant-9")]
    Dominant9,
    #[serde(rename = "dominant-11")]
    Dominant11,
    #[serde(rename = "dominant-13")]
    Dominant13,
    #[serde(rename = "major-7")]
    Major7,
    #[serde(rename = "major-9")]
    Major9,
    #[serde(rename = "major-11")]
    Major11,
    #[serde(rename = "major-13")]
    Major13,

    // Suspensions
    #[serde(rename = "sus")]
    Sus,
    #[serde(rename = "sus2")]
    Sus2,

    // Added tones
    #[serde(rename = "add-2")]
    Add2,
    #[serde(rename = "add-4")]
    Add4,
    #[serde(rename = "add-9")]
    Add9,
    #[serde(rename = "add-11")]
    Add11,
    #[serde(rename = "add-13")]
    Add13,

    // Alterations
    #[serde(rename = "flat-5")]
    FlatFifth,
    #[serde(rename = "sharp-5")]
    SharpFifth,
    #[serde(rename = "flat-9")]
    FlatNinth,
    #[serde(rename = "sharp-9")]
    SharpNinth,
    #[serde(rename = "sharp-11")]
    SharpEleventh,
    #[serde(rename = "flat-13")]
    FlatThirteenth,

    // Omissions
    #[serde(rename = "omit-3")]
    Omit3,
    #[serde(rename = "omit-5")]
    Omit5,
}

impl Modifier {
    pub const COUNT: usize = 32;

    pub const ALL: [Modifier; Modifier::COUNT] = [
        Modifier::Major,
        Modifier::Minor,
        Modifier::Augmented,
        Modifier::Diminished,
        Modifier::Diminished7,
        Modifier::HalfDiminished,
        Modifier::Power,
        Modifier::Sixth,
        Modifier::SixthNinth,
        Modifier::Dominant7,
        Modifier::Dominant9,
        Modifier::Dominant11,
        Modifier::Dominant13,
        Modifier::Major7,
        Modifier::Major9,
        Modifier::Major11,
        Modifier::Major13,
        Modifier::Sus,
        Modifier::Sus2,
        Modifier::Add2,
        Modifier::Add4,
        Modifier::Add9,
        Modifier::Add11,
        Modifier::Add13,
        Modifier::FlatFifth,
        Modifier::SharpFifth,
        Modifier::FlatNinth,
        Modifier::SharpNinth,
        Modifier::SharpEleventh,
        Modifier::FlatThirteenth,
        Modifier::Omit3,
        Modifier::Omit5,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Modifier::Major => "major",
            Modifier::Minor => "minor",
            Modifier::Augmented => "augmented",
            Modifier::Diminished => "diminished",
            Modifier::Diminished7 => "diminished-7",
            Modifier::HalfDiminished => "half-diminished",
            Modifier::Power => "power",
            Modifier::Sixth => "sixth",
            Modifier::SixthNinth => "sixth-ninth",
            Modifier::Dominant7 => "dominant-7",
            Modifier::Dominant9 => "dominant-9",
            Modifier::Dominant11 => "dominant-11",
            Modifier::Dominant13 => "dominant-13",
            Modifier::Major7 => "major-7",
            Modifier::Major9 => "major-9",
            Modifier::Major11 => "major-11",
            Modifier::Major13 => "major-13",
            Modifier::Sus => "sus",
            Modifier::Sus2 => "sus2",
            Modifier::Add2 => "add-2",
            Modifier::Add4 => "add-4",
            Modifier::Add9 => "add-9",
            Modifier::Add11 => "add-11",
            Modifier::Add13 => "add-13",
            Modifier::FlatFifth => "flat-5",
            Modifier::SharpFifth => "sharp-5",
            Modifier::FlatNinth => "flat-9",
            Modifier::SharpNinth => "sharp-9",
            Modifier::SharpEleventh => "sharp-11",
            Modifier::FlatThirteenth => "flat-13",
            Modifier::Omit3 => "omit-3",
            Modifier::Omit5 => "omit-5",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Modifier::ALL.iter().copied().find(|m| m.id() == id)
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl PartialEq<&str> for Modifier {
    fn eq(&self, other: &&str) -> bool {
        self.id() == *other
    }
}

/// Intervals a modifier brings into the chord and intervals it removes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifierDetail {
    #[serde(default)]
    pub includes: Vec<Interval>,
    #[serde(default)]
    pub omit: Vec<Interval>,
}

impl ModifierDetail {
    pub fn new(includes: &[Interval], omit: &[Interval]) -> Self {
        Self {
            includes: includes.to_vec(),
            omit: omit.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_in_declaration_order() {
        for (i, modifier) in Modifier::ALL.iter().enumerate() {
            assert_eq!(modifier.index(), i);
        }
    }

    #[test]
    fn test_ids_match_serde_names() {
        for modifier in Modifier::ALL {
            let json = serde_json::to_string(&modifier).unwrap();
            assert_eq!(json, format!("\"{}\"", modifier.id()));
            assert_eq!(Modifier::from_id(modifier.id()), Some(modifier));
        }
    }

    #[test]
    fn test_detail_defaults_missing_lists() {
        let detail: ModifierDetail = serde_yaml::from_str("includes: [b3]").unwrap();
        assert_eq!(detail, ModifierDetail::new(&[Interval::FlatThird], &[]));
    }
}
