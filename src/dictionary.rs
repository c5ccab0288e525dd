use ahash::{HashMap, HashMapExt, HashSet};
use smol_str::SmolStr;

use crate::{error::Result, filter::FilterResult, lookup::CodeLookup, record::ConceptRow};

pub type ConceptMap = HashMap<SmolStr, HashSet<SmolStr>>;

/// Lookups from a CUI to the names and source codes recorded for it in one vocabulary.
///
/// ```text
/// names: {"C0000473": {"4-aminobenzoic acid", "aminobenzoic acid"}, ...}
/// codes: {"C0000473": {"74"}, ...}
/// ```
#[derive(Debug, Clone, Default)]
pub struct Dictionaries {
    cuis: Vec<SmolStr>,
    names: Vec<SmolStr>,
    codes: Vec<SmolStr>,
    name_map: ConceptMap,
    code_map: ConceptMap,
}

impl Dictionaries {
    /// Build the dictionaries from the filtered records. A record too short to contain
    /// CUI, CODE and STR fails the whole build.
    pub fn build(filtered: &FilterResult) -> Result<Self> {
        let count = filtered.retained();
        let mut dict = Dictionaries {
            cuis: Vec::with_capacity(count),
            names: Vec::with_capacity(count),
            codes: Vec::with_capacity(count),
            name_map: HashMap::new(),
            code_map: HashMap::new(),
        };

        for (i, line) in filtered.records().iter().enumerate() {
            let row = ConceptRow::parse(line, i + 1)?;
            dict.insert(row);
        }

        tracing::info!(
            concepts = dict.len(),
            records = dict.cuis.len(),
            "Built concept dictionaries"
        );

        Ok(dict)
    }

    fn insert(&mut self, row: ConceptRow) {
        let cui = SmolStr::from(row.cui);
        let name = SmolStr::from(row.name);
        let code = SmolStr::from(row.code);

        self.name_map
            .entry(cui.clone())
            .or_default()
            .insert(name.clone());
        self.code_map
            .entry(cui.clone())
            .or_default()
            .insert(code.clone());

        self.cuis.push(cui);
        self.names.push(name);
        self.codes.push(code);
    }

    /// Number of distinct CUIs.
    pub fn len(&self) -> usize {
        self.name_map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.name_map.is_empty()
    }

    pub fn names_for(&self, cui: &str) -> Option<&HashSet<SmolStr>> {
        self.name_map.get(cui)
    }

    pub fn codes_for(&self, cui: &str) -> Option<&HashSet<SmolStr>> {
        self.code_map.get(cui)
    }

    pub fn name_map(&self) -> &ConceptMap {
        &self.name_map
    }

    pub fn code_map(&self) -> &ConceptMap {
        &self.code_map
    }

    /// CUI of every record, in input order.
    pub fn cuis(&self) -> &[SmolStr] {
        &self.cuis
    }

    /// STR of every record, parallel to [`Dictionaries::cuis`].
    pub fn names(&self) -> &[SmolStr] {
        &self.names
    }

    /// CODE of every record, parallel to [`Dictionaries::cuis`].
    pub fn codes(&self) -> &[SmolStr] {
        &self.codes
    }

    pub fn lookup_code(&self, query: &str) -> CodeLookup<'_> {
        CodeLookup::run(self, query)
    }
}

#[cfg(test)]
mod test {
    use crate::error::Error;

    use super::*;

    fn filtered(lines: &[&str]) -> FilterResult {
        FilterResult::from_lines("RXNORM", lines)
    }

    fn set(items: &[&str]) -> HashSet<SmolStr> {
        items.iter().map(|s| SmolStr::from(*s)).collect()
    }

    #[test]
    fn groups_by_cui() {
        let dict = Dictionaries::build(&filtered(&[
            "C1|ENG|P|L1|PF|S1|Y|A1||10|D|RXNORM|IN|10|drugA|0|N|",
            "C1|ENG|P|L2|PF|S2|Y|A2||10|D|RXNORM|IN|10|drugB|0|N|",
            "C3|ENG|P|L4|PF|S4|Y|A4||30|D|RXNORM|IN|30|drugC|0|N|",
            "C3|ENG|P|L5|PF|S5|Y|A5||31|D|RXNORM|BN|31|drugC|0|N|",
        ]))
        .unwrap();

        assert_eq!(dict.len(), 2);
        assert_eq!(dict.names_for("C1"), Some(&set(&["drugA", "drugB"])));
        assert_eq!(dict.codes_for("C1"), Some(&set(&["10"])));
        assert_eq!(dict.names_for("C3"), Some(&set(&["drugC"])));
        assert_eq!(dict.codes_for("C3"), Some(&set(&["30", "31"])));
        assert_eq!(dict.names_for("C2"), None);

        assert_eq!(dict.cuis(), &["C1", "C1", "C3", "C3"]);
        assert_eq!(dict.names(), &["drugA", "drugB", "drugC", "drugC"]);
        assert_eq!(dict.codes(), &["10", "10", "30", "31"]);
    }

    #[test]
    fn maps_share_keys() {
        let dict = Dictionaries::build(&filtered(&[
            "C1|ENG|P|L1|PF|S1|Y|A1||10|D|RXNORM|IN|10|drugA|0|N|",
            "C2|ENG|P|L2|PF|S2|Y|A2||20|D|RXNORM|IN|20||0|N|",
            "C3|ENG|P|L3|PF|S3|Y|A3||30|D|RXNORM|IN||drugC|0|N|",
        ]))
        .unwrap();

        let mut name_keys = dict.name_map().keys().collect::<Vec<_>>();
        let mut code_keys = dict.code_map().keys().collect::<Vec<_>>();
        name_keys.sort();
        code_keys.sort();
        assert_eq!(name_keys, code_keys);
        assert_eq!(name_keys.len(), 3);
    }

    #[test]
    fn empty_input() {
        let dict = Dictionaries::build(&FilterResult::default()).unwrap();
        assert!(dict.is_empty());
        assert!(dict.code_map().is_empty());
        assert!(dict.cuis().is_empty());
    }

    #[test]
    fn short_record_fails() {
        let err = Dictionaries::build(&filtered(&[
            "C1|ENG|P|L1|PF|S1|Y|A1||10|D|RXNORM|IN|10|drugA|0|N|",
            "C2|ENG|RXNORM",
        ]))
        .unwrap_err();
        assert!(matches!(err, Error::DataIntegrity { line: 2, fields: 3 }));
    }
}
