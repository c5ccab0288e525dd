use clap::Parser;
use eyre::Result;

mod cmd;
mod logging;

fn main() -> Result<()> {
    let args = cmd::Args::parse();

    cmd::run(args)
}
