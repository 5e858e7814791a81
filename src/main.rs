use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use fountain_ps::config::Geometry;
use fountain_ps::error::ConvertError;

#[derive(Parser)]
#[command(
    name = "fountain-ps",
    version,
    about = "Typeset a plain-text screenplay as paginated PostScript"
)]
struct Cli {
    /// Screenplay file (stdin when omitted or `-`)
    input: Option<PathBuf>,
    /// Output file (stdout when omitted or `-`)
    output: Option<PathBuf>,
    /// Print the classified elements as JSON instead of PostScript
    #[arg(long)]
    elements: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let input = read_input(stdio_or_path(cli.input.as_deref()))?;
    let mut output = open_output(stdio_or_path(cli.output.as_deref()))?;
    debug!(bytes = input.len(), "read screenplay");

    let geometry = Geometry::default();
    let bytes = if cli.elements {
        let screenplay = fountain_ps::parser::parse_screenplay(&input, &geometry);
        let mut json = serde_json::to_vec_pretty(&screenplay)?;
        json.push(b'\n');
        json
    } else {
        fountain_ps::convert(&input, &geometry)
    };

    output.write_all(&bytes).map_err(ConvertError::WriteOutput)?;
    output.flush().map_err(ConvertError::WriteOutput)?;
    Ok(())
}

/// `None` stands for the standard stream.
fn stdio_or_path(path: Option<&Path>) -> Option<&Path> {
    path.filter(|p| p.as_os_str() != "-")
}

fn read_input(path: Option<&Path>) -> Result<String, ConvertError> {
    let mut bytes = Vec::new();
    match path {
        Some(path) => {
            let mut file = File::open(path).map_err(|source| ConvertError::OpenInput {
                path: path.to_path_buf(),
                source,
            })?;
            file.read_to_end(&mut bytes)
                .map_err(ConvertError::ReadInput)?;
        }
        None => {
            io::stdin()
                .read_to_end(&mut bytes)
                .map_err(ConvertError::ReadInput)?;
        }
    }
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>, ConvertError> {
    match path {
        Some(path) => {
            let file = File::create(path).map_err(|source| ConvertError::OpenOutput {
                path: path.to_path_buf(),
                source,
            })?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}
