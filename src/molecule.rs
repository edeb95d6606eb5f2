use std::io::{self, Write};

use crate::paf::PafRecord;

/// Output format for molecule extents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Bed,
    Tsv,
}

/// Column header emitted once at the top of TSV output.
pub const TSV_HEADER: &str = "Rname\tStart\tEnd\tSize\tRead\tMatches";

/// A molecule extent: the span of one long-read mapping on a reference contig.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoleculeExtent {
    pub rname: String,
    pub start: u64,
    pub end: u64,
    pub read: String,
    pub matches: u64,
}

impl From<PafRecord> for MoleculeExtent {
    fn from(record: PafRecord) -> Self {
        MoleculeExtent {
            rname: record.target_name,
            start: record.target_start,
            end: record.target_end,
            read: record.query_name,
            matches: record.matches,
        }
    }
}

impl MoleculeExtent {
    pub fn size(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    /// Write this extent as one BED row.
    pub fn write_bed<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}",
            self.rname, self.start, self.end, self.read, self.matches
        )
    }

    /// Write this extent as one TSV row.
    pub fn write_tsv<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}\t{}",
            self.rname,
            self.start,
            self.end,
            self.size(),
            self.read,
            self.matches
        )
    }

    pub fn write<W: Write>(&self, out: &mut W, format: OutputFormat) -> io::Result<()> {
        match format {
            OutputFormat::Bed => self.write_bed(out),
            OutputFormat::Tsv => self.write_tsv(out),
        }
    }
}
