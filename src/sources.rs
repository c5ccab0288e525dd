//! The reference list of source vocabulary abbreviations a target is validated against.

use std::{
    io::BufRead,
    path::{Path, PathBuf},
};

use itertools::Itertools;
use smol_str::SmolStr;

use crate::{
    error::{Error, Result},
    files::{open_rrf, RrfLines},
};

// Column positions in MRSAB.RRF
const RSAB_IDX: usize = 3;
const SON_IDX: usize = 4;
const SF_IDX: usize = 5;
const LAT_IDX: usize = 19;
const CURVER_IDX: usize = 21;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UmlsSource {
    pub abbreviation: SmolStr,
    pub name: String,
    pub family: SmolStr,
    pub language: SmolStr,
}

impl UmlsSource {
    fn abbreviation_only(abbreviation: SmolStr) -> Self {
        UmlsSource {
            abbreviation,
            name: String::new(),
            family: SmolStr::default(),
            language: SmolStr::default(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SourceList {
    pub sources: Vec<UmlsSource>,
    abbreviations: Vec<SmolStr>,
}

impl SourceList {
    pub fn new(sources: Vec<UmlsSource>) -> Self {
        let sources = sources
            .into_iter()
            .unique_by(|s| s.abbreviation.clone())
            .collect::<Vec<_>>();
        let abbreviations = sources.iter().map(|s| s.abbreviation.clone()).collect();
        SourceList {
            sources,
            abbreviations,
        }
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        Self::new(
            names
                .into_iter()
                .map(|n| UmlsSource::abbreviation_only(n.into()))
                .collect(),
        )
    }

    /// Load a list of valid abbreviations. The format is chosen from the file name:
    /// `*.json` is a JSON array of strings, `MRSAB.RRF[.gz]` is the UMLS source table,
    /// and anything else is read as one abbreviation per line.
    pub fn load(path: &Path) -> Result<Self> {
        let file_name = path
            .file_name()
            .map(|f| f.to_string_lossy().to_uppercase())
            .unwrap_or_default();

        if file_name.ends_with(".JSON") {
            Self::load_json(path)
        } else if file_name.starts_with("MRSAB") {
            Self::load_mrsab(path)
        } else {
            Self::load_lines(path)
        }
    }

    fn load_json(path: &Path) -> Result<Self> {
        let reader = open_rrf(path)?;
        let names: Vec<SmolStr> =
            serde_json::from_reader(reader).map_err(|e| Error::SourceList {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        Ok(Self::from_names(names))
    }

    fn load_lines(path: &Path) -> Result<Self> {
        let names = RrfLines::new(open_rrf(path)?, path)
            .filter_map_ok(|line| {
                let line = line.trim();
                (!line.is_empty()).then(|| SmolStr::from(line))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_names(names))
    }

    fn load_mrsab(path: &Path) -> Result<Self> {
        let sources = read_mrsab(open_rrf(path)?, path)?;
        Ok(Self::new(sources))
    }

    pub fn abbreviations(&self) -> &[SmolStr] {
        &self.abbreviations
    }

    pub fn contains(&self, name: &str) -> bool {
        self.abbreviations.iter().any(|a| a == name)
    }

    pub fn len(&self) -> usize {
        self.abbreviations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.abbreviations.is_empty()
    }
}

/// Read the current-version rows of MRSAB.
fn read_mrsab(reader: impl BufRead, path: &Path) -> Result<Vec<UmlsSource>> {
    let mut mrsab = csv::ReaderBuilder::new()
        .delimiter(b'|')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(reader);

    let parse_error = |message: String| Error::SourceList {
        path: PathBuf::from(path),
        message,
    };

    let mut sources = Vec::new();
    for (row, line) in mrsab.records().enumerate() {
        let line = line.map_err(|e| parse_error(e.to_string()))?;
        let rsab = line
            .get(RSAB_IDX)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| parse_error(format!("row {} has no RSAB column", row + 1)))?;

        if line.get(CURVER_IDX).is_some_and(|c| c == "N") {
            continue;
        }

        sources.push(UmlsSource {
            abbreviation: rsab.into(),
            name: line.get(SON_IDX).unwrap_or_default().to_string(),
            family: line.get(SF_IDX).unwrap_or_default().into(),
            language: line.get(LAT_IDX).unwrap_or_default().into(),
        });
    }

    Ok(sources)
}
