use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use noodles::bgzf;

use crate::error::MolextentError;

/// Open a PAF input source, returning a boxed BufRead.
///
/// The literal path `-` selects stdin. Files ending in `.gz`/`.bgz` are
/// opened through a bgzip reader; anything else is read as plain text.
pub fn open_input<P: AsRef<Path>>(path: P) -> Result<Box<dyn BufRead>> {
    let path = path.as_ref();

    if path.as_os_str() == "-" {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }

    let file = File::open(path)
        .with_context(|| format!("cannot open PAF input: {}", path.display()))?;

    // Check by file extension (faster than reading magic bytes)
    let is_compressed = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == "gz" || ext == "bgz")
        .unwrap_or(false);

    if is_compressed {
        Ok(Box::new(BufReader::new(bgzf::io::reader::Reader::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// One PAF row, reduced to the columns molecule extent detection consumes.
///
/// Columns 1, 6, 8, 9, 10 are required; column 12 (mapping quality) is kept
/// when the row carries it. Everything else is ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PafRecord {
    pub query_name: String,
    pub target_name: String,
    pub target_start: u64,
    pub target_end: u64,
    pub matches: u64,
    pub mapq: Option<u8>,
}

impl PafRecord {
    /// Minimum number of tab-separated columns a row must carry.
    pub const MIN_FIELDS: usize = 10;

    /// Parse one PAF line. `line_no` is 1-based, used only for diagnostics.
    pub fn parse(line: &str, line_no: u64) -> Result<Self, MolextentError> {
        let fields: Vec<&str> = line.trim().split('\t').collect();

        if fields.len() < Self::MIN_FIELDS {
            return Err(MolextentError::MalformedRow {
                line: line_no,
                reason: format!(
                    "expected at least {} tab-separated columns, found {}",
                    Self::MIN_FIELDS,
                    fields.len()
                ),
            });
        }

        let numeric = |idx: usize, name: &str| -> Result<u64, MolextentError> {
            fields[idx].parse().map_err(|_| MolextentError::MalformedRow {
                line: line_no,
                reason: format!(
                    "{name} (column {}) is not numeric: {:?}",
                    idx + 1,
                    fields[idx]
                ),
            })
        };

        let target_start = numeric(7, "target start")?;
        let target_end = numeric(8, "target end")?;
        let matches = numeric(9, "matching bases")?;

        // Mapping quality is column 12; minimal 10-column rows omit it.
        let mapq = if fields.len() > 11 {
            Some(
                fields[11]
                    .parse()
                    .map_err(|_| MolextentError::MalformedRow {
                        line: line_no,
                        reason: format!(
                            "mapping quality (column 12) is not numeric: {:?}",
                            fields[11]
                        ),
                    })?,
            )
        } else {
            None
        };

        Ok(PafRecord {
            query_name: fields[0].to_string(),
            target_name: fields[5].to_string(),
            target_start,
            target_end,
            matches,
            mapq,
        })
    }

    /// Extent length on the target contig.
    pub fn extent_len(&self) -> u64 {
        self.target_end.saturating_sub(self.target_start)
    }
}
