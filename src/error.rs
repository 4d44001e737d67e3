//! # Error Types
//!
//! All failures of the chord parser are reported through [`ChordError`].
//!
//! ## Error Kinds
//! - `UnknownRoot` - the input does not start with a known note spelling
//! - `UnmatchedDescriptor` - part of the descriptor is not a known modifier
//! - `NoModifiers` - the descriptor is non-empty but matched nothing
//! - `InvalidTables` / `Yaml` / `Regex` - the lookup tables are unusable
//!
//! The first three are ordinary "not a chord" outcomes and collapse to `None`
//! in [`crate::parse_chord`]. The others are data defects caught when a
//! [`crate::ChordParser`] is built, never while parsing.
//!
//! ## Usage
//! ```rust
//! use chord_symbol::{try_parse_chord, ChordError};
//!
//! match try_parse_chord("Cxyz") {
//!     Ok(chord) => println!("{:?}", chord.intervals),
//!     Err(ChordError::UnmatchedDescriptor { residual, .. }) => {
//!         eprintln!("don't know what '{}' means", residual);
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChordError {
    /// The input does not begin with any accepted note spelling.
    ///
    /// # Example
    /// ```
    /// # use chord_symbol::ChordError;
    /// let err = ChordError::UnknownRoot { input: "Hm7".to_string() };
    /// assert_eq!(err.to_string(), "No known root note at the start of 'Hm7'");
    /// ```
    #[error("No known root note at the start of '{input}'")]
    UnknownRoot { input: String },

    /// Symbols were matched but some characters of the descriptor were not explained.
    ///
    /// # Example
    /// ```
    /// # use chord_symbol::ChordError;
    /// let err = ChordError::UnmatchedDescriptor {
    ///     descriptor: "m7xyz".to_string(),
    ///     residual: "xyz".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Unrecognized 'xyz' in chord descriptor 'm7xyz'");
    /// ```
    #[error("Unrecognized '{residual}' in chord descriptor '{descriptor}'")]
    UnmatchedDescriptor { descriptor: String, residual: String },

    /// A non-empty descriptor in which no modifier symbol was found.
    #[error("No chord modifier found in descriptor '{descriptor}'")]
    NoModifiers { descriptor: String },

    /// Lookup tables failed validation (duplicate or empty spellings, ...).
    #[error("Invalid chord tables: {0}")]
    InvalidTables(String),

    /// A tables file is not valid YAML or does not fit the table layout.
    #[error("Invalid chord tables YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The root/bass pattern built from the note spellings was rejected.
    #[error("Could not build note pattern: {0}")]
    Regex(#[from] regex::Error),
}

impl ChordError {
    /// True for the "not a chord" outcomes, false for table/data defects.
    pub fn is_unparsable(&self) -> bool {
        matches!(
            self,
            ChordError::UnknownRoot { .. }
                | ChordError::UnmatchedDescriptor { .. }
                | ChordError::NoModifiers { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_errors_are_table_defects() {
        let err: ChordError = serde_yaml::from_str::<Vec<u8>>("[1, two]").unwrap_err().into();
        assert!(matches!(err, ChordError::Yaml(_)));
        assert!(!err.is_unparsable());
        assert!(err.to_string().starts_with("Invalid chord tables YAML"));
    }
}
