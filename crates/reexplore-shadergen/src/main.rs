use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use reexplore_engine::logging::{init_logging, LoggingConfig};

const USAGE: &str = "usage: reexplore-shadergen [--check] [--output <path>]";

/// Command-line options.
#[derive(Debug, Default, PartialEq)]
struct Options {
    /// Write the header here instead of stdout.
    output: Option<PathBuf>,
    /// Only verify layouts; write nothing.
    check: bool,
}

impl Options {
    fn parse(args: impl IntoIterator<Item = String>) -> Result<Self> {
        let mut options = Self::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-o" | "--output" => {
                    let path = args.next().with_context(|| format!("{arg} needs a path\n{USAGE}"))?;
                    options.output = Some(PathBuf::from(path));
                }
                "--check" => options.check = true,
                "-h" | "--help" => bail!("{USAGE}"),
                other => bail!("unknown argument `{other}`\n{USAGE}"),
            }
        }
        Ok(options)
    }
}

fn run(options: &Options) -> Result<()> {
    reexplore_shader::verify_all().context("host records disagree with their Metal layout")?;
    log::info!("all shader interchange layouts match Metal");

    if options.check {
        return Ok(());
    }

    let header = reexplore_shader::msl::metal_header();
    match &options.output {
        Some(path) => {
            std::fs::write(path, &header)
                .with_context(|| format!("failed to write {}", path.display()))?;
            log::info!("wrote {} ({} bytes)", path.display(), header.len());
        }
        None => print!("{header}"),
    }
    Ok(())
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());
    let options = Options::parse(std::env::args().skip(1))?;
    run(&options)
}
