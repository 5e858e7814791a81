pub mod config;
pub mod error;
pub mod layout;
pub mod output;
pub mod parser;
pub mod wrap;

use config::Geometry;

/// Convert screenplay markup to a PostScript byte stream.
pub fn convert(input: &str, geometry: &Geometry) -> Vec<u8> {
    let screenplay = parser::parse_screenplay(input, geometry);
    let document = layout::layout_screenplay(screenplay, geometry);
    output::postscript::encode(&document)
}
