use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::warn;

use super::error::ConvertError;

/// Only ASCII digits count; a line like "٥ people found this review helpful"
/// stays in the review body.
static HELPFUL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]+) people found this review helpful").expect("helpful pattern is valid")
});

/// One review, as written to a single output row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRecord {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Review")]
    pub review_text: String,
    #[serde(rename = "People_Found_Helpful")]
    pub helpful_count: u64,
}

pub struct ReviewParser;

impl ReviewParser {
    /// Parses one segmented block into a record.
    ///
    /// Line 0 is the reviewer, line 1 the date. The body runs until the first
    /// line carrying "<n> people found this review helpful", or to the end
    /// of the block when no such line exists. `position` is the 1-based block
    /// number and only shows up in errors.
    pub fn parse_block(block: &str, position: usize) -> Result<ReviewRecord, ConvertError> {
        let lines: Vec<&str> = block.split('\n').collect();
        let (name, date, rest) = match lines.as_slice() {
            [name, date, rest @ ..] => (name.trim(), date.trim(), rest),
            _ => {
                return Err(ConvertError::MalformedBlock {
                    position,
                    line_count: lines.len(),
                });
            }
        };

        let mut helpful_count = 0;
        let mut body_end = rest.len();
        for (i, line) in rest.iter().enumerate() {
            if let Some(caps) = HELPFUL_PATTERN.captures(line) {
                let digits = &caps[1];
                helpful_count = digits.parse().map_err(|_| ConvertError::InvalidHelpfulCount {
                    position,
                    value: digits.to_string(),
                })?;
                body_end = i;
                break;
            }
        }

        let mut review_text = rest[..body_end].join("\n").trim().to_string();

        // Nobody voted and no count line was scraped; the last line is page residue.
        if review_text.is_empty() {
            let without_last = rest.len().saturating_sub(1);
            review_text = rest[..without_last].join("\n").trim().to_string();
            helpful_count = 0;
            warn!(position, "empty review body, retried without the block's last line");
        }

        Ok(ReviewRecord {
            name: name.to_string(),
            date: date.to_string(),
            review_text,
            helpful_count,
        })
    }
}
