//! Scale-degree intervals relative to the chord root.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A scale-degree label such as `3`, `b5` or `#11`.
///
/// The vocabulary is closed; how many semitones each label spans is data and
/// lives in [`crate::tables::SemitoneTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Interval {
    #[serde(rename = "1")]
    Root,
    #[serde(rename = "2")]
    Second,
    #[serde(rename = "b3")]
    FlatThird,
    #[serde(rename = "3")]
    Third,
    #[serde(rename = "4")]
    Fourth,
    #[serde(rename = "b5")]
    FlatFifth,
    #[serde(rename = "5")]
    Fifth,
    #[serde(rename = "#5")]
    SharpFifth,
    #[serde(rename = "b6")]
    FlatSixth,
    #[serde(rename = "6")]
    Sixth,
    #[serde(rename = "bb7")]
    DoubleFlatSeventh,
    #[serde(rename = "b7")]
    FlatSeventh,
    #[serde(rename = "7")]
    Seventh,
    #[serde(rename = "b9")]
    FlatNinth,
    #[serde(rename = "9")]
    Ninth,
    #[serde(rename = "#9")]
    SharpNinth,
    #[serde(rename = "11")]
    Eleventh,
    #[serde(rename = "#11")]
    SharpEleventh,
    #[serde(rename = "b13")]
    FlatThirteenth,
    #[serde(rename = "13")]
    Thirteenth,
}

impl Interval {
    pub const COUNT: usize = 20;

    pub const ALL: [Interval; Interval::COUNT] = [
        Interval::Root,
        Interval::Second,
        Interval::FlatThird,
        Interval::Third,
        Interval::Fourth,
        Interval::FlatFifth,
        Interval::Fifth,
        Interval::SharpFifth,
        Interval::FlatSixth,
        Interval::Sixth,
        Interval::DoubleFlatSeventh,
        Interval::FlatSeventh,
        Interval::Seventh,
        Interval::FlatNinth,
        Interval::Ninth,
        Interval::SharpNinth,
        Interval::Eleventh,
        Interval::SharpEleventh,
        Interval::FlatThirteenth,
        Interval::Thirteenth,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Interval::Root => "1",
            Interval::Second => "2",
            Interval::FlatThird => "b3",
            Interval::Third => "3",
            Interval::Fourth => "4",
            Interval::FlatFifth => "b5",
            Interval::Fifth => "5",
            Interval::SharpFifth => "#5",
            Interval::FlatSixth => "b6",
            Interval::Sixth => "6",
            Interval::DoubleFlatSeventh => "bb7",
            Interval::FlatSeventh => "b7",
            Interval::Seventh => "7",
            Interval::FlatNinth => "b9",
            Interval::Ninth => "9",
            Interval::SharpNinth => "#9",
            Interval::Eleventh => "11",
            Interval::SharpEleventh => "#11",
            Interval::FlatThirteenth => "b13",
            Interval::Thirteenth => "13",
        }
    }

    /// Parse a label like `"b3"`.
    pub fn from_label(label: &str) -> Option<Self> {
        Interval::ALL.iter().copied().find(|i| i.as_str() == label)
    }

    /// Position in [`Interval::ALL`], used to index per-interval tables.
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PartialEq<&str> for Interval {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

/// True when none of `candidates` appears in `intervals`.
pub fn has_none_of(intervals: &[Interval], candidates: &[Interval]) -> bool {
    !candidates.iter().any(|c| intervals.contains(c))
}
