use std::fmt;

use ahash::HashSet;
use itertools::Itertools;
use smol_str::SmolStr;

use crate::dictionary::Dictionaries;

/// Trim whitespace and one layer of matching single or double quotes from a queried code.
/// Stored codes are compared as they appear in the file.
pub fn normalize_code(query: &str) -> &str {
    let trimmed = query.trim();
    for quote in ['\'', '"'] {
        if let Some(inner) = trimmed
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner.trim();
        }
    }
    trimmed
}

/// The concepts that carry a given source code.
#[derive(Debug)]
pub struct CodeLookup<'a> {
    pub query: SmolStr,
    /// Matching CUIs, sorted.
    pub cuis: Vec<&'a SmolStr>,
    /// Name set of each CUI in `cuis`.
    pub names: Vec<Option<&'a HashSet<SmolStr>>>,
}

impl<'a> CodeLookup<'a> {
    pub(crate) fn run(dict: &'a Dictionaries, query: &str) -> Self {
        let code = normalize_code(query);

        // A straight scan over every concept. Lookups are one-off, so no reverse index is kept.
        let cuis = dict
            .code_map()
            .iter()
            .filter(|(_, codes)| codes.contains(code))
            .map(|(cui, _)| cui)
            .sorted()
            .collect::<Vec<_>>();

        let names = cuis.iter().map(|cui| dict.names_for(cui)).collect();

        for cui in &cuis {
            tracing::debug!(code, cui = %cui, "Code matched");
        }

        CodeLookup {
            query: code.into(),
            cuis,
            names,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cuis.is_empty()
    }
}

impl fmt::Display for CodeLookup<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "query = {}", self.query)?;
        if self.is_empty() {
            return writeln!(f, "  No concepts found");
        }

        for (cui, names) in self.cuis.iter().zip(&self.names) {
            let names = names
                .map(|n| n.iter().sorted().join(", "))
                .unwrap_or_default();
            writeln!(f, "  {cui} - {names}")?;
        }

        Ok(())
    }
}
