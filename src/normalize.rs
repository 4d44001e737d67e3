//! # Descriptor Normalizer
//!
//! Rewrites the raw chord descriptor (the text between root and bass note)
//! into the canonical form the symbol matcher works on.
//!
//! ## Pipeline
//! 1. [`fold_case_except_major_m`] - lowercase everything except `M`, which
//!    means "major" while `m` means "minor"
//! 2. [`remove_spaces`] - drop all whitespace
//! 3. [`add_disambiguators`] - split a few token pairs the matcher would
//!    otherwise read wrongly (`madd9` → `m add9`)
//! 4. [`add_missing_verbs`] - expand `(add9,11)` to `,add9,add11,`
//!
//! Every step is total: it never fails, it only rewrites text. List tokens
//! stay apart by [`LIST_SEPARATOR`], which step 2 keeps, so running the
//! pipeline on its own output changes nothing.
//!
//! ## Example
//! ```rust
//! use chord_symbol::normalize_descriptor;
//!
//! assert_eq!(normalize_descriptor("MAJ7"), "Maj7");
//! assert_eq!(normalize_descriptor("m add 9"), "m add9");
//! assert_eq!(normalize_descriptor("7(b9,#11)"), "7,b9,#11,");
//! assert_eq!(normalize_descriptor("7,b9,#11,"), "7,b9,#11,");
//! ```

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static LETTER_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-LN-Za-z]+").unwrap());

static DISAMBIGUATORS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    vec![
        (Regex::new(r"(7?dim)add").unwrap(), "${1} add"),
        (Regex::new(r"([mM])add").unwrap(), "${1} add"),
        (Regex::new(r"i(no[35])").unwrap(), "i ${1}"),
        (Regex::new(r"([b♭#♯]9)6").unwrap(), "${1} 6"),
        (Regex::new(r"(9/?6)").unwrap(), " ${1}"),
    ]
});

static PARENTHESIZED: Lazy<Regex> = Lazy::new(|| Regex::new(r"\((.*?)\)").unwrap());

/// Boundary between the tokens of an expanded list. The matcher skips it.
pub const LIST_SEPARATOR: char = ',';

/// Verbs a token inside a parenthesized list may start with.
const VERBS: [&str; 3] = ["add", "omit", "no"];

/// Run the full normalization pipeline on a descriptor.
pub fn normalize_descriptor(descriptor: &str) -> String {
    let filters: [fn(&str) -> String; 4] = [
        fold_case_except_major_m,
        remove_spaces,
        add_disambiguators,
        add_missing_verbs,
    ];

    filters
        .iter()
        .fold(descriptor.to_string(), |normalized, filter| filter(&normalized))
}

/// Lowercase every letter run except the capital `M`.
///
/// Words containing an `M` come out as `oMit`, `diM` or `augMented`; those are
/// restored to their lowercase spelling.
pub fn fold_case_except_major_m(descriptor: &str) -> String {
    LETTER_RUN
        .replace_all(descriptor, |caps: &Captures| caps[0].to_lowercase())
        .replace("oMit", "omit")
        .replace("diM", "dim")
        .replace("augMented", "augmented")
}

pub fn remove_spaces(descriptor: &str) -> String {
    descriptor.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Insert a space at token boundaries the matcher would otherwise misread.
pub fn add_disambiguators(descriptor: &str) -> String {
    DISAMBIGUATORS
        .iter()
        .fold(descriptor.to_string(), |text, (pattern, replacement)| {
            pattern.replace_all(&text, *replacement).into_owned()
        })
}

/// Give every token of a parenthesized list its own verb.
///
/// `(add9,11,13)` becomes `,add9,add11,add13,`: a token without a verb
/// repeats the last verb seen in the same list, a token with one sets it.
/// Tokens before any verb are kept as they are (`(b9,#11)` → `,b9,#11,`).
pub fn add_missing_verbs(descriptor: &str) -> String {
    PARENTHESIZED
        .replace_all(descriptor, |caps: &Captures| {
            let mut current_verb = "";
            let tokens: Vec<String> = caps[1]
                .split(LIST_SEPARATOR)
                .map(|token| match VERBS.iter().find(|verb| token.starts_with(**verb)) {
                    Some(verb) => {
                        current_verb = *verb;
                        token.to_string()
                    }
                    None => format!("{}{}", current_verb, token),
                })
                .collect();
            let separator = LIST_SEPARATOR.to_string();
            format!("{0}{1}{0}", separator, tokens.join(separator.as_str()))
        })
        .into_owned()
}
