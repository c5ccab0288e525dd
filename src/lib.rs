//! Extract the rows of one source vocabulary from the UMLS MRCONSO table and build
//! CUI → names and CUI → codes dictionaries from them.
//!
//! The steps run in order, each consuming the previous step's output:
//!
//! ```no_run
//! use std::path::Path;
//! use umls_sab::{select_target, Dictionaries, LineFilter, TargetCheck};
//!
//! # fn main() -> umls_sab::Result<()> {
//! let target = select_target("RXNORM", TargetCheck::Unchecked)?;
//! let filtered = LineFilter::new(&target).filter_file(Path::new("META/MRCONSO.RRF"))?;
//! let dict = Dictionaries::build(&filtered)?;
//! println!("{}", dict.lookup_code("74"));
//! # Ok(())
//! # }
//! ```

pub mod dictionary;
pub mod error;
pub mod export;
pub mod files;
pub mod filter;
pub mod lookup;
pub mod record;
pub mod sources;
pub mod target;

pub use dictionary::Dictionaries;
pub use error::{Error, Result};
pub use filter::{filter_file, FilterResult, LineFilter};
pub use lookup::CodeLookup;
pub use sources::SourceList;
pub use target::{select_target, Target, TargetCheck};
