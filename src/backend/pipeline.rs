use std::fs;
use std::io;
use std::path::PathBuf;
use tracing::{debug, info};

use super::error::ConvertError;
use super::export::{write_csv, write_json};
use super::parser::{ReviewParser, ReviewRecord};
use super::segment::{normalize_newlines, segment_blocks};
use super::settings::{OutputFormat, Settings};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionSummary {
    pub reviews: usize,
    pub output: PathBuf,
}

/// Parses every block, stopping at the first malformed one.
///
/// Any mix of `\n`, `\r\n` and `\r` line endings is accepted.
pub fn parse_all(raw: &str) -> Result<Vec<ReviewRecord>, ConvertError> {
    let text = normalize_newlines(raw);
    let blocks = segment_blocks(&text);
    debug!("segmented {} blocks", blocks.len());

    blocks
        .iter()
        .enumerate()
        .map(|(i, block)| -> Result<ReviewRecord, ConvertError> {
            let record = ReviewParser::parse_block(block, i + 1)?;
            debug!(
                position = i + 1,
                helpful = record.helpful_count,
                "parsed review by {}",
                record.name
            );
            Ok(record)
        })
        .collect()
}

/// Reads the scraped review dump, converts it and writes the result.
///
/// Nothing is written unless every block parses.
pub fn parse_reviews(settings: &Settings) -> Result<ConversionSummary, ConvertError> {
    let input = &settings.input_path;
    info!("reading reviews from {:?}", input);
    let content = fs::read_to_string(input).map_err(|source| {
        if source.kind() == io::ErrorKind::InvalidData {
            ConvertError::InputNotUtf8 {
                path: input.clone(),
                source,
            }
        } else {
            ConvertError::InputNotFound {
                path: input.clone(),
                source,
            }
        }
    })?;

    let records = parse_all(&content)?;

    let output = &settings.output_path;
    let written = match settings.format {
        OutputFormat::Csv => write_csv(&records, output)?,
        OutputFormat::Json => write_json(&records, output)?,
    };
    info!("wrote {} {} rows to {:?}", written, settings.format.name(), output);

    Ok(ConversionSummary {
        reviews: written,
        output: output.clone(),
    })
}
