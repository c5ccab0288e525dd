pub mod extract;
pub mod list_sources;
pub mod lookup;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use eyre::{Result, WrapErr};
use indicatif::{ProgressBar, ProgressStyle};
use umls_sab::{
    files::find_rrf_file, select_target, Dictionaries, FilterResult, LineFilter, SourceList,
    Target, TargetCheck,
};

use crate::logging;

#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    #[arg(
        short,
        long,
        env = "UMLS_DIR",
        default_value = ".",
        help = "The directory containing the UMLS files"
    )]
    pub dir: PathBuf,

    #[arg(
        long,
        env = "UMLS_MRCONSO",
        help = "Path to MRCONSO.RRF. Defaults to searching the UMLS directory"
    )]
    pub mrconso: Option<PathBuf>,

    /// Increase logging verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract a source vocabulary and build the CUI dictionaries
    Extract(extract::ExtractArgs),
    /// Find the concepts that carry a source code
    Lookup(lookup::LookupArgs),
    /// List the source vocabularies a target can be chosen from
    ListSources(list_sources::ListSourcesArgs),
}

#[derive(clap::Args, Debug)]
pub struct TargetArgs {
    /// The source vocabulary abbreviation (SAB) to extract, e.g. RXNORM
    #[arg(short, long, env = "UMLS_TARGET")]
    pub target: String,

    #[arg(
        short,
        long,
        help = "File listing the valid SABs: MRSAB.RRF, a JSON array, or one per line. Defaults to MRSAB.RRF in the UMLS directory"
    )]
    pub sources: Option<PathBuf>,

    /// Accept the target without checking it against the source list
    #[arg(long)]
    pub no_check: bool,

    /// Don't show a progress bar while scanning MRCONSO
    #[arg(long)]
    pub no_progress: bool,
}

pub fn run(args: Args) -> Result<()> {
    logging::init(args.verbose, args.quiet);

    match args.command {
        Commands::Extract(cmd_args) => extract::run(&args.dir, args.mrconso.as_deref(), cmd_args),
        Commands::Lookup(cmd_args) => lookup::run(&args.dir, args.mrconso.as_deref(), cmd_args),
        Commands::ListSources(cmd_args) => list_sources::run(&args.dir, cmd_args),
    }
}

pub(crate) fn load_sources(dir: &Path, path: Option<&Path>) -> Result<SourceList> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => find_rrf_file(dir, "MRSAB")?,
    };

    SourceList::load(&path).wrap_err_with(|| format!("Loading source list {}", path.display()))
}

fn progress_bar(hidden: bool) -> ProgressBar {
    if hidden {
        return ProgressBar::hidden();
    }

    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {human_pos} lines ({per_sec})") {
        bar.set_style(style);
    }
    bar
}

/// Everything the subcommands need after running selection, filtering and construction.
pub(crate) struct Extracted {
    pub target: Target,
    pub filtered: FilterResult,
    pub dict: Dictionaries,
}

pub(crate) fn extract_target(
    dir: &Path,
    mrconso: Option<&Path>,
    args: &TargetArgs,
) -> Result<Extracted> {
    let target = if args.no_check {
        select_target(&args.target, TargetCheck::Unchecked)?
    } else {
        let sources = load_sources(dir, args.sources.as_deref())?;
        select_target(&args.target, TargetCheck::Against(sources.abbreviations()))?
    };

    let mrconso = match mrconso {
        Some(path) => path.to_path_buf(),
        None => find_rrf_file(dir, "MRCONSO")?,
    };

    tracing::info!(path = %mrconso.display(), "Scanning");
    let filtered = LineFilter::new(&target)
        .with_progress(progress_bar(args.no_progress))
        .filter_file(&mrconso)?;

    let dict = Dictionaries::build(&filtered)?;

    Ok(Extracted {
        target,
        filtered,
        dict,
    })
}
