use std::{io::BufRead, path::Path};

use indicatif::ProgressBar;

use crate::{
    error::Result,
    files::{open_rrf, RrfLines},
    record::DELIMITER,
    target::Target,
};

/// The lines of the source file that mention the target vocabulary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterResult {
    records: Vec<String>,
    total_lines: usize,
}

impl FilterResult {
    /// Matching lines in file order, without line terminators.
    pub fn records(&self) -> &[String] {
        &self.records
    }

    /// Every line read, matching or not.
    pub fn total_lines(&self) -> usize {
        self.total_lines
    }

    pub fn retained(&self) -> usize {
        self.records.len()
    }

    pub fn discarded(&self) -> usize {
        self.total_lines - self.records.len()
    }
}

/// True if any `|` separated field of the line is exactly `target`.
/// This deliberately looks at every field rather than only the SAB column.
pub fn line_matches(line: &str, target: &str) -> bool {
    line.trim().split(DELIMITER).any(|field| field == target)
}

pub struct LineFilter<'a> {
    target: &'a Target,
    progress: ProgressBar,
}

impl<'a> LineFilter<'a> {
    pub fn new(target: &'a Target) -> Self {
        LineFilter {
            target,
            progress: ProgressBar::hidden(),
        }
    }

    /// Tick this progress bar once per line read.
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    pub fn filter_file(&self, path: &Path) -> Result<FilterResult> {
        let reader = open_rrf(path)?;
        self.filter_lines(RrfLines::new(reader, path))
    }

    pub fn filter_reader(&self, reader: impl BufRead, label: &str) -> Result<FilterResult> {
        self.filter_lines(RrfLines::new(reader, label))
    }

    fn filter_lines(&self, lines: impl Iterator<Item = Result<String>>) -> Result<FilterResult> {
        let target = self.target.name();
        let mut result = FilterResult::default();

        for line in lines {
            let line = line?;
            if line_matches(&line, target) {
                result.records.push(line);
            }
            result.total_lines += 1;
            self.progress.inc(1);
        }

        self.progress.finish_and_clear();
        tracing::info!(
            target_sab = target,
            retained = result.retained(),
            total = result.total_lines,
            "{} / {} records were extracted",
            result.retained(),
            result.total_lines
        );

        Ok(result)
    }
}

#[cfg(test)]
impl FilterResult {
    /// Filter `lines` for `target` without going through a file.
    pub(crate) fn from_lines(target: &str, lines: &[&str]) -> Self {
        let target = crate::target::select_target(target, crate::target::TargetCheck::Unchecked)
            .unwrap();
        LineFilter::new(&target)
            .filter_reader(lines.join("\n").as_bytes(), "test")
            .unwrap()
    }
}

/// Read `path` and keep the lines that mention `target`.
pub fn filter_file(path: &Path, target: &Target) -> Result<FilterResult> {
    LineFilter::new(target).filter_file(path)
}

#[cfg(test)]
mod test {
    use crate::{
        error::Error,
        target::{select_target, TargetCheck},
    };

    use super::*;

    const SAMPLE: &str = "\
C1|ENG|P|L1|PF|S1|Y|A1||10|D|RXNORM|IN|10|drugA|0|N|
C1|ENG|P|L2|PF|S2|Y|A2||10|D|RXNORM|IN|10|drugB|0|N|
C2|ENG|P|L3|PF|S3|Y|A3||20|D|SNOMED|IN|20|other|0|N|
";

    fn target(name: &str) -> Target {
        select_target(name, TargetCheck::Unchecked).unwrap()
    }

    fn run(input: &[u8], name: &str) -> FilterResult {
        let target = target(name);
        LineFilter::new(&target)
            .filter_reader(input, "test")
            .unwrap()
    }

    #[test]
    fn keeps_matching_lines() {
        let result = run(SAMPLE.as_bytes(), "RXNORM");
        assert_eq!(result.retained(), 2);
        assert_eq!(result.total_lines(), 3);
        assert_eq!(result.discarded(), 1);
        assert_eq!(
            result.records()[0],
            "C1|ENG|P|L1|PF|S1|Y|A1||10|D|RXNORM|IN|10|drugA|0|N|"
        );
    }

    #[test]
    fn counts_add_up() {
        let result = FilterResult::from_lines(
            "RXNORM",
            &["a|RXNORM|b", "", "c|MSH|d", "RXNORM", "e|rxnorm"],
        );
        assert_eq!(result.total_lines(), 5);
        assert_eq!(result.records(), &["a|RXNORM|b", "RXNORM"]);
        assert_eq!(result.retained() + result.discarded(), result.total_lines());
    }

    #[test]
    fn exact_case_sensitive_match() {
        assert!(line_matches("a|RXNORM|b", "RXNORM"));
        assert!(!line_matches("a|rxnorm|b", "RXNORM"));
        assert!(!line_matches("a|RXNORM_2023|b", "RXNORM"));
        assert!(!line_matches("a|XRXNORM|b", "RXNORM"));
        assert!(line_matches("  RXNORM|b  \n", "RXNORM"));
    }

    #[test]
    fn matches_any_field() {
        // The target appearing in STR still retains the row.
        let line = "C9|ENG|P|L9|PF|S9|Y|A9||9|D|MSH|MH|D9|RXNORM|0|N|";
        let result = run(line.as_bytes(), "RXNORM");
        assert_eq!(result.retained(), 1);
    }

    #[test]
    fn absent_target() {
        let result = run(SAMPLE.as_bytes(), "MSH");
        assert_eq!(result.retained(), 0);
        assert_eq!(result.total_lines(), 3);
    }

    #[test]
    fn empty_input() {
        let result = run(b"", "RXNORM");
        assert_eq!(result, FilterResult::default());
    }

    #[test]
    fn invalid_bytes_are_skipped() {
        let input = b"C1|ENG|P|L1|PF|S1|Y|A1||10|D|RXNORM|IN|10|dr\xffugA|0|N|\n";
        let result = run(input, "RXNORM");
        assert_eq!(result.retained(), 1);
        assert!(result.records()[0].contains("|drugA|"));
    }

    #[test]
    fn idempotent() {
        let first = run(SAMPLE.as_bytes(), "RXNORM");
        let second = run(SAMPLE.as_bytes(), "RXNORM");
        assert_eq!(first, second);
    }

    #[test]
    fn progress_counts_lines() {
        let target = target("RXNORM");
        let progress = ProgressBar::hidden();
        LineFilter::new(&target)
            .with_progress(progress.clone())
            .filter_reader(SAMPLE.as_bytes(), "test")
            .unwrap();
        assert_eq!(progress.position(), 3);
    }

    #[test]
    fn missing_file() {
        let target = target("RXNORM");
        let err = filter_file(Path::new("/no/such/MRCONSO.RRF"), &target).unwrap_err();
        assert!(matches!(err, Error::SourceFile { .. }));
    }
}
