//! # Interval Resolver
//!
//! Turns the matched modifiers into the final interval set.
//!
//! ## Steps
//! 1. Seed: the root (`1`) plus every interval the modifiers include, and
//!    every interval they omit, from [`ChordTables::detail`].
//! 2. Apply [`RULES`] in order. Each rule is a pure function of the current
//!    state and the modifier list, and may add to `included` or `omitted`.
//! 3. Finalize: `included − omitted`, first occurrence kept, sorted by
//!    semitone offset. Semitones are looked up for the same list, so both
//!    vectors stay index-aligned.
//!
//! The rule order matters. An 11th chord under major intent, for example,
//! only loses its third because rule 1 has already added it to `included`
//! and rule 3 then omits it.
//!
//! ## Example
//! ```rust
//! use chord_symbol::{resolve, ChordTables, Modifier};
//!
//! let tables = ChordTables::default();
//! let resolution = resolve(&[Modifier::Minor, Modifier::Dominant7], &tables);
//! assert_eq!(resolution.intervals, ["1", "b3", "5", "b7"]);
//! assert_eq!(resolution.semitones, [0, 3, 7, 10]);
//! ```

use crate::interval::{has_none_of, Interval};
use crate::modifier::Modifier;
use crate::tables::{ChordTables, SemitoneTable};
use tracing::trace;

/// Modifiers that rule out major intent.
const NON_MAJOR_QUALITIES: [Modifier; 4] = [
    Modifier::Minor,
    Modifier::Diminished,
    Modifier::Diminished7,
    Modifier::HalfDiminished,
];

const ELEVENTH_FAMILY: [Modifier; 2] = [Modifier::Major11, Modifier::Dominant11];

const THIRTEENTH_FAMILY: [Modifier; 2] = [Modifier::Dominant13, Modifier::Major13];

/// Working sets the rules operate on.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResolutionState {
    pub included: Vec<Interval>,
    pub omitted: Vec<Interval>,
}

impl ResolutionState {
    /// Root plus everything the modifiers declare.
    pub fn seeded(modifiers: &[Modifier], tables: &ChordTables) -> Self {
        let mut state = Self {
            included: vec![Interval::Root],
            omitted: Vec::new(),
        };
        for modifier in modifiers {
            let detail = tables.detail(*modifier);
            state.include(&detail.includes);
            state.omit(&detail.omit);
        }
        state
    }

    fn include(&mut self, intervals: &[Interval]) {
        self.included.extend_from_slice(intervals);
    }

    fn omit(&mut self, intervals: &[Interval]) {
        self.omitted.extend_from_slice(intervals);
    }
}

/// A named step of the resolution pipeline.
#[derive(Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub apply: fn(ResolutionState, &[Modifier]) -> ResolutionState,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish()
    }
}

pub const RULES: [Rule; 6] = [
    Rule {
        name: "implied-third",
        apply: add_implied_third,
    },
    Rule {
        name: "implied-fifth",
        apply: add_implied_fifth,
    },
    Rule {
        name: "major-eleventh-suspension",
        apply: suspend_major_eleventh,
    },
    Rule {
        name: "flat-thirteenth-replaces-fifth",
        apply: drop_fifth_for_flat_thirteenth,
    },
    Rule {
        name: "thirteenth-drops-eleventh",
        apply: drop_eleventh_for_thirteenth,
    },
    Rule {
        name: "minor-sus",
        apply: suspend_minor_third,
    },
];

/// Not minor, diminished, diminished 7th or half-diminished.
pub fn has_major_intent(modifiers: &[Modifier]) -> bool {
    !NON_MAJOR_QUALITIES.iter().any(|q| modifiers.contains(q))
}

fn has_any_of(modifiers: &[Modifier], candidates: &[Modifier]) -> bool {
    candidates.iter().any(|c| modifiers.contains(c))
}

/// Rule 1: a third is implied unless one is present or the chord is suspended.
pub fn add_implied_third(mut state: ResolutionState, modifiers: &[Modifier]) -> ResolutionState {
    if has_none_of(&state.included, &[Interval::FlatThird, Interval::Third])
        && !modifiers.contains(&Modifier::Sus)
        && !modifiers.contains(&Modifier::Sus2)
    {
        state.include(&[Interval::Third]);
    }
    state
}

/// Rule 2: a fifth is implied unless an altered fifth or a b13 stands in for it.
pub fn add_implied_fifth(mut state: ResolutionState, _modifiers: &[Modifier]) -> ResolutionState {
    if has_none_of(
        &state.included,
        &[
            Interval::FlatFifth,
            Interval::Fifth,
            Interval::SharpFifth,
            Interval::FlatThirteenth,
        ],
    ) {
        state.include(&[Interval::Fifth]);
    }
    state
}

/// Rule 3: an 11th chord under major intent is voiced with a 4th instead of
/// a third and an 11th.
pub fn suspend_major_eleventh(mut state: ResolutionState, modifiers: &[Modifier]) -> ResolutionState {
    if has_major_intent(modifiers) && has_any_of(modifiers, &ELEVENTH_FAMILY) {
        state.omit(&[Interval::FlatThird, Interval::Third, Interval::Eleventh]);
        state.include(&[Interval::Fourth]);
    }
    state
}

/// Rule 4: b13 supersedes the fifth.
pub fn drop_fifth_for_flat_thirteenth(
    mut state: ResolutionState,
    _modifiers: &[Modifier],
) -> ResolutionState {
    if state.included.contains(&Interval::FlatThirteenth) {
        state.omit(&[Interval::Fifth]);
    }
    state
}

/// Rule 5: a 13th chord under major intent drops its 11th.
pub fn drop_eleventh_for_thirteenth(
    mut state: ResolutionState,
    modifiers: &[Modifier],
) -> ResolutionState {
    if has_major_intent(modifiers) && has_any_of(modifiers, &THIRTEENTH_FAMILY) {
        state.omit(&[Interval::Eleventh]);
    }
    state
}

/// Rule 6: minor together with sus keeps the 4th, not the minor third.
pub fn suspend_minor_third(mut state: ResolutionState, modifiers: &[Modifier]) -> ResolutionState {
    if modifiers.contains(&Modifier::Minor) && modifiers.contains(&Modifier::Sus) {
        state.omit(&[Interval::FlatThird]);
        state.include(&[Interval::Fourth]);
    }
    state
}

/// Final intervals and their semitone offsets, index-aligned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub intervals: Vec<Interval>,
    pub semitones: Vec<u8>,
}

/// Run the rule pipeline over `state`.
pub fn apply_rules(state: ResolutionState, modifiers: &[Modifier]) -> ResolutionState {
    RULES.iter().fold(state, |state, rule| {
        let before = state.clone();
        let after = (rule.apply)(state, modifiers);
        if after != before {
            trace!(rule = rule.name, included = ?after.included, omitted = ?after.omitted, "rule applied");
        }
        after
    })
}

/// `included − omitted`, deduplicated and sorted by semitone offset.
pub fn finalize(state: ResolutionState, semitones: &SemitoneTable) -> Resolution {
    let mut intervals: Vec<Interval> = Vec::with_capacity(state.included.len());
    for interval in state.included {
        if !state.omitted.contains(&interval) && !intervals.contains(&interval) {
            intervals.push(interval);
        }
    }
    intervals.sort_by_key(|interval| semitones.get(*interval));

    let mut offsets: Vec<u8> = intervals.iter().map(|i| semitones.get(*i)).collect();
    offsets.sort_unstable();

    Resolution {
        intervals,
        semitones: offsets,
    }
}

/// Resolve a modifier list to its intervals. Never fails: the tables are
/// total over modifiers and intervals.
pub fn resolve(modifiers: &[Modifier], tables: &ChordTables) -> Resolution {
    let state = apply_rules(ResolutionState::seeded(modifiers, tables), modifiers);
    finalize(state, tables.semitones())
}
