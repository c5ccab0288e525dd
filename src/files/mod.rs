use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use flate2::read::GzDecoder;

use crate::error::{Error, Result};

mod find_files;

pub use find_files::find_rrf_file;

/// Open an RRF file for sequential reading, decompressing it if the name ends in `.gz`.
pub fn open_rrf(path: &Path) -> Result<Box<dyn BufRead>> {
    let file = File::open(path).map_err(|e| Error::source_file(path, e))?;

    let reader: Box<dyn BufRead> = if is_gzip(path) {
        Box::new(BufReader::new(GzDecoder::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };

    Ok(reader)
}

fn is_gzip(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("gz"))
        .unwrap_or(false)
}

/// Decode UTF-8, dropping any bytes that are not part of a valid sequence.
pub fn decode_lossy(bytes: &[u8]) -> String {
    let mut output = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        output.push_str(chunk.valid());
    }
    output
}

/// Iterates over the lines of a reader one at a time, without the line terminator.
/// Invalid UTF-8 is dropped rather than treated as an error.
pub struct RrfLines<R> {
    reader: R,
    path: PathBuf,
    buf: Vec<u8>,
}

impl<R: BufRead> RrfLines<R> {
    /// `path` is only used to label read errors.
    pub fn new(reader: R, path: impl Into<PathBuf>) -> Self {
        RrfLines {
            reader,
            path: path.into(),
            buf: Vec::with_capacity(512),
        }
    }
}

impl<R: BufRead> Iterator for RrfLines<R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                let mut line = self.buf.as_slice();
                if let Some(rest) = line.strip_suffix(b"\n") {
                    line = rest;
                }
                if let Some(rest) = line.strip_suffix(b"\r") {
                    line = rest;
                }
                Some(Ok(decode_lossy(line)))
            }
            Err(e) => Some(Err(Error::source_file(self.path.clone(), e))),
        }
    }
}
