//! # Symbol Matcher
//!
//! Splits a normalized descriptor into modifier symbols.
//!
//! The scan runs left to right and, at each position, takes the longest
//! spelling from the table that starts there (`maj7` wins over `maj` + `7`,
//! `m7b5` over `m` + `7` + `b5`). Whitespace and the list separator between
//! symbols are skipped.
//! Any other character no spelling starts with is residual, and a descriptor
//! with residual text is rejected as a whole.

use crate::error::ChordError;
use crate::modifier::Modifier;
use crate::normalize::LIST_SEPARATOR;
use crate::tables::ChordTables;
use tracing::trace;

/// Result of scanning a descriptor, before acceptance checks.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Scan {
    /// Matched modifiers in order of appearance.
    pub modifiers: Vec<Modifier>,
    /// Characters no spelling accounted for, separators excluded.
    pub residual: String,
}

#[derive(Debug, Clone)]
pub struct SymbolMatcher {
    /// Longest spelling first, so the first hit at a position is the longest.
    symbols: Vec<(String, Modifier)>,
}

impl SymbolMatcher {
    pub fn new(tables: &ChordTables) -> Self {
        let mut symbols: Vec<(String, Modifier)> = tables
            .modifier_spellings()
            .map(|(symbol, modifier)| (symbol.to_string(), modifier))
            .collect();
        symbols.sort_by(|(a, _), (b, _)| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        symbols.dedup_by(|(a, _), (b, _)| a == b);

        Self { symbols }
    }

    fn longest_at<'a>(&'a self, text: &str) -> Option<&'a (String, Modifier)> {
        self.symbols.iter().find(|(symbol, _)| text.starts_with(symbol.as_str()))
    }

    /// Scan without judging the outcome.
    pub fn scan(&self, descriptor: &str) -> Scan {
        let mut scan = Scan::default();
        let mut rest = descriptor;

        while let Some(c) = rest.chars().next() {
            match self.longest_at(rest) {
                Some((symbol, modifier)) => {
                    scan.modifiers.push(*modifier);
                    rest = &rest[symbol.len()..];
                }
                None => {
                    if !c.is_whitespace() && c != LIST_SEPARATOR {
                        scan.residual.push(c);
                    }
                    rest = &rest[c.len_utf8()..];
                }
            }
        }

        scan
    }

    /// Match a normalized descriptor, requiring every non-space character to
    /// belong to a known symbol and at least one symbol to be present.
    pub fn match_modifiers(&self, descriptor: &str) -> Result<Vec<Modifier>, ChordError> {
        let scan = self.scan(descriptor);
        trace!(descriptor, modifiers = ?scan.modifiers, residual = %scan.residual, "scanned descriptor");

        if !scan.residual.is_empty() {
            return Err(ChordError::UnmatchedDescriptor {
                descriptor: descriptor.to_string(),
                residual: scan.residual,
            });
        }
        if scan.modifiers.is_empty() {
            return Err(ChordError::NoModifiers {
                descriptor: descriptor.to_string(),
            });
        }
        Ok(scan.modifiers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize_descriptor;

    fn matcher() -> SymbolMatcher {
        SymbolMatcher::new(&ChordTables::default())
    }

    #[test]
    fn test_longest_spelling_wins() {
        let matcher = matcher();
        assert_eq!(matcher.match_modifiers("maj7").unwrap(), vec![Modifier::Major7]);
        assert_eq!(matcher.match_modifiers("m7b5").unwrap(), vec![Modifier::HalfDiminished]);
        assert_eq!(matcher.match_modifiers("sus2").unwrap(), vec![Modifier::Sus2]);
        assert_eq!(matcher.match_modifiers("omit3").unwrap(), vec![Modifier::Omit3]);
    }

    #[test]
    fn test_symbols_compose_in_order() {
        let matcher = matcher();
        assert_eq!(
            matcher.match_modifiers("m7").unwrap(),
            vec![Modifier::Minor, Modifier::Dominant7]
        );
        assert_eq!(
            matcher.match_modifiers("7b9#11").unwrap(),
            vec![Modifier::Dominant7, Modifier::FlatNinth, Modifier::SharpEleventh]
        );
        assert_eq!(
            matcher.match_modifiers("misus").unwrap(),
            vec![Modifier::Minor, Modifier::Sus]
        );
    }

    #[test]
    fn test_whitespace_separates_symbols() {
        let matcher = matcher();
        assert_eq!(
            matcher.match_modifiers("7 no5 add13 ").unwrap(),
            vec![Modifier::Dominant7, Modifier::Omit5, Modifier::Add13]
        );
        assert_eq!(
            matcher.match_modifiers("7,no5,add13,").unwrap(),
            vec![Modifier::Dominant7, Modifier::Omit5, Modifier::Add13]
        );
        assert_eq!(
            matcher.match_modifiers("m add9").unwrap(),
            vec![Modifier::Minor, Modifier::Add9]
        );
    }

    #[test]
    fn test_list_separator_keeps_neighbours_apart() {
        let matcher = matcher();
        assert_eq!(matcher.match_modifiers("69").unwrap(), vec![Modifier::SixthNinth]);
        assert_eq!(
            matcher.match_modifiers(",6,9,").unwrap(),
            vec![Modifier::Sixth, Modifier::Dominant9]
        );
        assert!(matches!(
            matcher.match_modifiers(",,"),
            Err(ChordError::NoModifiers { .. })
        ));
    }

    #[test]
    fn test_renormalized_lists_scan_the_same() {
        let matcher = matcher();
        for descriptor in ["(6,9)", "7(9,6)", "7(b9,6)", "m(add9,11,13)"] {
            let once = normalize_descriptor(descriptor);
            let twice = normalize_descriptor(&once);
            assert_eq!(matcher.scan(&once), matcher.scan(&twice), "descriptor {}", descriptor);
        }
        assert_eq!(
            matcher.scan(&normalize_descriptor("7(9,6)")).modifiers,
            vec![Modifier::Dominant7, Modifier::Dominant9, Modifier::Sixth]
        );
    }

    #[test]
    fn test_residual_is_reported() {
        let matcher = matcher();
        let scan = matcher.scan("m7xyz");
        assert_eq!(scan.modifiers, vec![Modifier::Minor, Modifier::Dominant7]);
        assert_eq!(scan.residual, "xyz");

        match matcher.match_modifiers("m7 x") {
            Err(ChordError::UnmatchedDescriptor { residual, .. }) => assert_eq!(residual, "x"),
            other => panic!("expected UnmatchedDescriptor, got {:?}", other),
        }
    }

    #[test]
    fn test_nothing_matched() {
        let matcher = matcher();
        assert!(matches!(
            matcher.match_modifiers("   "),
            Err(ChordError::NoModifiers { .. })
        ));
        assert!(matches!(
            matcher.match_modifiers(""),
            Err(ChordError::NoModifiers { .. })
        ));
        assert!(matches!(
            matcher.match_modifiers("xyz"),
            Err(ChordError::UnmatchedDescriptor { .. })
        ));
    }

    #[test]
    fn test_every_builtin_spelling_matches_only_itself() {
        // a spelling that splits into other spellings would be unreachable
        let tables = ChordTables::default();
        let matcher = SymbolMatcher::new(&tables);
        for (symbol, modifier) in tables.modifier_spellings() {
            let normalized = normalize_descriptor(symbol);
            assert_eq!(
                matcher.match_modifiers(&normalized).unwrap(),
                vec![modifier],
                "spelling '{}'",
                symbol
            );
        }
    }

    #[test]
    fn test_multibyte_symbols() {
        let matcher = matcher();
        assert_eq!(
            matcher.match_modifiers("Δ7♯11").unwrap(),
            vec![Modifier::Major7, Modifier::SharpEleventh]
        );
        assert_eq!(matcher.match_modifiers("ø").unwrap(), vec![Modifier::HalfDiminished]);
        assert_eq!(matcher.scan("ß").residual, "ß");
    }
}
