use std::path::Path;

use clap::Args;
use eyre::Result;

use super::{extract_target, TargetArgs};

#[derive(Debug, Args)]
pub struct LookupArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// The source codes to look up. Surrounding quotes are ignored.
    #[arg(required = true)]
    pub codes: Vec<String>,
}

pub fn run(dir: &Path, mrconso: Option<&Path>, args: LookupArgs) -> Result<()> {
    let extracted = extract_target(dir, mrconso, &args.target)?;

    for code in &args.codes {
        print!("{}", extracted.dict.lookup_code(code));
    }

    Ok(())
}
