//! Column layout of the MRCONSO table.
//!
//! ```text
//! C0001041|ENG|P|L0001041|PF|S0414245|N|A31756755|12252053|194||RXNORM|IN|194|acetylcholine|0|N|4352|
//! ```

use crate::error::{Error, Result};

/// Column names of MRCONSO.RRF, in file order.
pub const MRCONSO_COLUMNS: [&str; 18] = [
    "CUI", "LAT", "TS", "LUI", "STT", "SUI", "ISPREF", "AUI", "SAUI", "SCUI", "SDUI", "SAB", "TTY",
    "CODE", "STR", "SRL", "SUPPRESS", "CVF",
];

pub const CUI_IDX: usize = 0;
pub const SAB_IDX: usize = 11;
pub const CODE_IDX: usize = 13;
pub const STR_IDX: usize = 14;

/// The fewest fields a row can have and still yield CUI, CODE and STR.
pub const MIN_FIELDS: usize = STR_IDX + 1;

pub const DELIMITER: char = '|';

/// Strip surrounding whitespace and split a line into its fields.
pub fn split_fields(line: &str) -> Vec<&str> {
    line.trim().split(DELIMITER).collect()
}

/// Position of a column by name.
pub fn column_index(name: &str) -> Option<usize> {
    MRCONSO_COLUMNS.iter().position(|c| *c == name)
}

/// The parts of a row the dictionaries are built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConceptRow<'a> {
    pub cui: &'a str,
    pub code: &'a str,
    pub name: &'a str,
}

impl<'a> ConceptRow<'a> {
    /// Parse a retained line. `line_number` is only used for error reporting.
    pub fn parse(line: &'a str, line_number: usize) -> Result<Self> {
        let fields = split_fields(line);
        if fields.len() < MIN_FIELDS {
            return Err(Error::DataIntegrity {
                line: line_number,
                fields: fields.len(),
            });
        }

        Ok(ConceptRow {
            cui: fields[CUI_IDX],
            code: fields[CODE_IDX],
            name: fields[STR_IDX],
        })
    }
}
