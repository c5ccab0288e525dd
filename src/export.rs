use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use flate2::write::GzEncoder;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::{
    dictionary::{ConceptMap, Dictionaries},
    error::{Error, Result},
    filter::FilterResult,
    target::Target,
};

/// A serializable snapshot of the dictionaries, with keys and values sorted.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct DictionaryExport {
    pub target: SmolStr,
    pub retained: usize,
    pub total: usize,
    pub cui_to_names: BTreeMap<SmolStr, Vec<SmolStr>>,
    pub cui_to_codes: BTreeMap<SmolStr, Vec<SmolStr>>,
}

fn sorted_map(map: &ConceptMap) -> BTreeMap<SmolStr, Vec<SmolStr>> {
    map.iter()
        .map(|(cui, values)| (cui.clone(), values.iter().cloned().sorted().collect()))
        .collect()
}

impl DictionaryExport {
    pub fn new(target: &Target, filtered: &FilterResult, dict: &Dictionaries) -> Self {
        DictionaryExport {
            target: target.name().into(),
            retained: filtered.retained(),
            total: filtered.total_lines(),
            cui_to_names: sorted_map(dict.name_map()),
            cui_to_codes: sorted_map(dict.code_map()),
        }
    }

    /// Write pretty-printed JSON to `path`, gzipped if the path ends in `.gz`.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let export_error = |source: std::io::Error| Error::Export {
            path: path.to_path_buf(),
            source,
        };

        let writer = BufWriter::new(File::create(path).map_err(export_error)?);
        let gzip = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("gz"))
            .unwrap_or(false);

        if gzip {
            let mut encoder = GzEncoder::new(writer, flate2::Compression::default());
            serde_json::to_writer_pretty(&mut encoder, self)
                .map_err(|e| export_error(e.into()))?;
            let buf_writer = encoder.finish().map_err(export_error)?;
            buf_writer
                .into_inner()
                .map_err(|e| export_error(e.into_error()))?
                .flush()
                .map_err(export_error)?;
        } else {
            let mut writer = writer;
            serde_json::to_writer_pretty(&mut writer, self).map_err(|e| export_error(e.into()))?;
            writer.flush().map_err(export_error)?;
        }

        tracing::info!(path = %path.display(), concepts = self.cui_to_names.len(), "Wrote dictionaries");
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use std::io::Read;

    use flate2::read::GzDecoder;

    use crate::target::{select_target, TargetCheck};

    use super::*;

    fn export() -> DictionaryExport {
        let filtered = FilterResult::from_lines(
            "RXNORM",
            &[
                "C1|ENG|P|L2|PF|S2|Y|A2||10|D|RXNORM|IN|10|drugB|0|N|",
                "C1|ENG|P|L1|PF|S1|Y|A1||10|D|RXNORM|IN|10|drugA|0|N|",
                "C2|ENG|P|L3|PF|S3|Y|A3||20|D|SNOMED|IN|20|other|0|N|",
            ],
        );
        let dict = Dictionaries::build(&filtered).unwrap();
        let target = select_target("RXNORM", TargetCheck::Unchecked).unwrap();
        DictionaryExport::new(&target, &filtered, &dict)
    }

    #[test]
    fn sorted_snapshot() {
        let export = export();
        assert_eq!(export.retained, 2);
        assert_eq!(export.total, 3);
        assert_eq!(export.cui_to_names["C1"], vec!["drugA", "drugB"]);
        assert_eq!(export.cui_to_codes["C1"], vec!["10"]);
    }

    #[test]
    fn writes_json_and_gzip() {
        let dir = tempfile::tempdir().unwrap();
        let export = export();

        let plain = dir.path().join("rxnorm.json");
        export.write_json(&plain).unwrap();
        let read: DictionaryExport =
            serde_json::from_reader(File::open(&plain).unwrap()).unwrap();
        assert_eq!(read, export);

        let gz = dir.path().join("rxnorm.json.gz");
        export.write_json(&gz).unwrap();
        let mut contents = String::new();
        GzDecoder::new(File::open(&gz).unwrap())
            .read_to_string(&mut contents)
            .unwrap();
        let read: DictionaryExport = serde_json::from_str(&contents).unwrap();
        assert_eq!(read, export);
    }

    #[test]
    fn unwritable_path() {
        let err = export()
            .write_json(Path::new("/no/such/dir/out.json"))
            .unwrap_err();
        assert!(matches!(err, Error::Export { .. }));
    }
}
