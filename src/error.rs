use std::path::PathBuf;

/// Failures at the file boundary. The conversion itself cannot fail.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("Failed to open input file {}", .path.display())]
    OpenInput {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to open output file {}", .path.display())]
    OpenOutput {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to read input")]
    ReadInput(#[source] std::io::Error),
    #[error("Failed to write output")]
    WriteOutput(#[source] std::io::Error),
}
