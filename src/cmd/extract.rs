use std::path::{Path, PathBuf};

use clap::Args;
use eyre::Result;
use umls_sab::export::DictionaryExport;

use super::{extract_target, TargetArgs};

#[derive(Debug, Args)]
pub struct ExtractArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    #[clap(
        long,
        short,
        help = "Write the dictionaries to this JSON file. Compressed if the name ends in .gz"
    )]
    pub output: Option<PathBuf>,
}

pub fn run(dir: &Path, mrconso: Option<&Path>, args: ExtractArgs) -> Result<()> {
    let extracted = extract_target(dir, mrconso, &args.target)?;

    println!(
        "{}: {} / {} records were extracted, {} concepts",
        extracted.target,
        extracted.filtered.retained(),
        extracted.filtered.total_lines(),
        extracted.dict.len()
    );

    if let Some(output) = args.output {
        DictionaryExport::new(&extracted.target, &extracted.filtered, &extracted.dict)
            .write_json(&output)?;
    }

    Ok(())
}
