use smol_str::SmolStr;

use crate::error::{Error, Result};

/// How a requested target vocabulary should be checked.
#[derive(Debug, Clone, Copy)]
pub enum TargetCheck<'a> {
    /// The name must be one of these abbreviations.
    Against(&'a [SmolStr]),
    /// Accept any name.
    Unchecked,
}

/// The source vocabulary abbreviation whose rows are extracted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    name: SmolStr,
    validated: bool,
}

impl Target {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// False when the name was accepted without checking it against a reference list.
    pub fn is_validated(&self) -> bool {
        self.validated
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// Choose the target vocabulary. Matching against the reference list is exact and case-sensitive.
pub fn select_target(name: &str, check: TargetCheck) -> Result<Target> {
    let validated = match check {
        TargetCheck::Against(valid) => {
            if !valid.iter().any(|v| v == name) {
                return Err(Error::InvalidTarget {
                    name: name.into(),
                    valid: valid.to_vec(),
                });
            }
            true
        }
        TargetCheck::Unchecked => {
            tracing::warn!(
                target_sab = name,
                "Target was not checked against the source list, results may be unreliable"
            );
            false
        }
    };

    tracing::info!(target_sab = name, validated, "Selected target");

    Ok(Target {
        name: name.into(),
        validated,
    })
}
