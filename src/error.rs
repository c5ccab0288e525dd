use std::path::PathBuf;

use itertools::Itertools;
use smol_str::SmolStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The requested SAB is not in the reference vocabulary list.
    #[error("Inappropriate target SAB {name:?}; choose from: {}", .valid.iter().join(", "))]
    InvalidTarget { name: SmolStr, valid: Vec<SmolStr> },

    #[error("Could not read {}: {source}", .path.display())]
    SourceFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A retained record is too short to hold CUI, CODE and STR.
    #[error("Retained record {line} has {fields} fields, expected at least {}", crate::record::MIN_FIELDS)]
    DataIntegrity { line: usize, fields: usize },

    #[error("Could not parse source list {}: {message}", .path.display())]
    SourceList { path: PathBuf, message: String },

    #[error("No {stem}.RRF file found in or under {}", .base.display())]
    NotFound { base: PathBuf, stem: String },

    #[error("Could not write {}: {source}", .path.display())]
    Export {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn source_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::SourceFile {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn invalid_target_lists_options() {
        let err = Error::InvalidTarget {
            name: "RXNROM".into(),
            valid: vec!["MSH".into(), "RXNORM".into()],
        };
        assert_eq!(
            err.to_string(),
            "Inappropriate target SAB \"RXNROM\"; choose from: MSH, RXNORM"
        );
    }

    #[test]
    fn data_integrity_message() {
        let err = Error::DataIntegrity { line: 3, fields: 4 };
        assert_eq!(
            err.to_string(),
            "Retained record 3 has 4 fields, expected at least 15"
        );
    }
}
