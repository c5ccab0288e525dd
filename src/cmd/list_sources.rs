use std::path::{Path, PathBuf};

use clap::Args;
use eyre::Result;

#[derive(Debug, Args)]
pub struct ListSourcesArgs {
    /// The source list to print. Defaults to MRSAB.RRF in the UMLS directory
    #[arg(short, long)]
    pub sources: Option<PathBuf>,
}

pub fn run(dir: &Path, args: ListSourcesArgs) -> Result<()> {
    let sources = super::load_sources(dir, args.sources.as_deref())?;

    for source in sources.sources {
        if source.name.is_empty() {
            println!("{}", source.abbreviation);
        } else {
            println!(
                "{} - {} - {} - {}",
                source.abbreviation, source.language, source.family, source.name
            )
        }
    }

    Ok(())
}
