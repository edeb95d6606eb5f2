use std::io::{BufRead, Write};

use crate::error::MolextentError;
use crate::molecule::{MoleculeExtent, OutputFormat, TSV_HEADER};
use crate::paf::PafRecord;

/// Filter configuration
#[derive(Debug, Clone)]
pub struct FilterConfig {
    pub min_size: u64, // -m/--size
    pub min_mapq: u8,  // -q/--mapq, 0 disables the check
    pub format: OutputFormat,
}

impl Default for FilterConfig {
    fn default() -> Self {
        FilterConfig {
            min_size: 2000,
            min_mapq: 0,
            format: OutputFormat::Bed,
        }
    }
}

/// Counts reported after a filtering run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterStats {
    pub records_in: u64,
    pub records_out: u64,
}

/// Streaming PAF to molecule extent filter.
pub struct ExtentFilter {
    config: FilterConfig,
}

impl ExtentFilter {
    pub fn new(config: FilterConfig) -> Self {
        ExtentFilter { config }
    }

    /// Single pass over a PAF stream, writing qualifying extents in input
    /// order.
    ///
    /// Each qualifying row is written as soon as it is read; nothing is
    /// buffered across records, so whatever was written before a malformed
    /// row stays written. The first malformed row aborts the run.
    pub fn filter_paf<R: BufRead, W: Write>(
        &self,
        reader: R,
        writer: &mut W,
    ) -> Result<FilterStats, MolextentError> {
        let mut stats = FilterStats::default();

        if self.config.format == OutputFormat::Tsv {
            writeln!(writer, "{TSV_HEADER}")?;
        }

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let record = PafRecord::parse(&line, idx as u64 + 1)?;
            stats.records_in += 1;

            if !self.keep(&record) {
                continue;
            }

            MoleculeExtent::from(record).write(writer, self.config.format)?;
            stats.records_out += 1;
        }

        writer.flush()?;
        Ok(stats)
    }

    fn keep(&self, record: &PafRecord) -> bool {
        if record.extent_len() < self.config.min_size {
            return false;
        }
        // Rows without a mapq column (minimal 10-column PAF) pass the check.
        if self.config.min_mapq > 0 {
            if let Some(mapq) = record.mapq {
                if mapq < self.config.min_mapq {
                    return false;
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn run(config: FilterConfig, input: &str) -> (FilterStats, String) {
        let filter = ExtentFilter::new(config);
        let mut out = Vec::new();
        let stats = filter.filter_paf(Cursor::new(input), &mut out).unwrap();
        (stats, String::from_utf8(out).unwrap())
    }

    #[test]
    fn threshold_is_inclusive() {
        let input = "readA\t500\t0\t450\t+\tcontigB\t10000\t0\t2000\t80\t2000\t60\n";
        let (stats, out) = run(FilterConfig::default(), input);
        assert_eq!(stats.records_out, 1);
        assert_eq!(out, "contigB\t0\t2000\treadA\t80\n");
    }

    #[test]
    fn short_extents_are_dropped() {
        let input = "readA\t500\t0\t450\t+\tcontigB\t10000\t0\t1999\t80\t1999\t60\n";
        let (stats, out) = run(FilterConfig::default(), input);
        assert_eq!(stats, FilterStats { records_in: 1, records_out: 0 });
        assert_eq!(out, "");
    }

    #[test]
    fn output_preserves_input_order() {
        let input = "\
readC\t500\t0\t450\t+\tcontig2\t10000\t100\t5100\t90\t5000\t60
readB\t500\t0\t450\t+\tcontig1\t10000\t0\t300\t20\t300\t60
readA\t500\t0\t450\t+\tcontig1\t10000\t200\t4200\t85\t4000\t60
";
        let (stats, out) = run(FilterConfig::default(), input);
        assert_eq!(stats, FilterStats { records_in: 3, records_out: 2 });
        assert_eq!(
            out,
            "contig2\t100\t5100\treadC\t90\ncontig1\t200\t4200\treadA\t85\n"
        );
    }

    #[test]
    fn mapq_filter_drops_low_quality_rows() {
        let input = "\
readA\t500\t0\t450\t+\tcontig1\t10000\t0\t3000\t80\t3000\t5
readB\t500\t0\t450\t+\tcontig1\t10000\t0\t3000\t80\t3000\t60
";
        let config = FilterConfig { min_mapq: 20, ..FilterConfig::default() };
        let (stats, out) = run(config, input);
        assert_eq!(stats.records_out, 1);
        assert_eq!(out, "contig1\t0\t3000\treadB\t80\n");
    }

    #[test]
    fn mapq_filter_ignores_rows_without_mapq_column() {
        let input = "readA\t500\t0\t450\t+\tcontig1\t10000\t0\t3000\t80\n";
        let config = FilterConfig { min_mapq: 20, ..FilterConfig::default() };
        let (stats, _) = run(config, input);
        assert_eq!(stats.records_out, 1);
    }

    #[test]
    fn mapq_filter_disabled_by_default() {
        let input = "readA\t500\t0\t450\t+\tcontig1\t10000\t0\t3000\t80\t3000\t0\n";
        let (stats, _) = run(FilterConfig::default(), input);
        assert_eq!(stats.records_out, 1);
    }

    #[test]
    fn tsv_header_is_emitted_once_before_records() {
        let input = "\
readA\t500\t0\t450\t+\tcontig1\t10000\t0\t3000\t80\t3000\t60
readB\t500\t0\t450\t+\tcontig1\t10000\t0\t4000\t90\t4000\t60
";
        let config = FilterConfig { format: OutputFormat::Tsv, ..FilterConfig::default() };
        let (_, out) = run(config, input);
        assert_eq!(
            out,
            "Rname\tStart\tEnd\tSize\tRead\tMatches\n\
             contig1\t0\t3000\t3000\treadA\t80\n\
             contig1\t0\t4000\t4000\treadB\t90\n"
        );
    }

    #[test]
    fn malformed_row_aborts_after_flushing_earlier_output() {
        let input = "\
readA\t500\t0\t450\t+\tcontig1\t10000\t0\t3000\t80\t3000\t60
readB\t500\t0
";
        let filter = ExtentFilter::new(FilterConfig::default());
        let mut out = Vec::new();
        let err = filter.filter_paf(Cursor::new(input), &mut out).unwrap_err();
        assert!(matches!(err, MolextentError::MalformedRow { line: 2, .. }));
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "contig1\t0\t3000\treadA\t80\n"
        );
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let (stats, out) = run(FilterConfig::default(), "");
        assert_eq!(stats, FilterStats::default());
        assert_eq!(out, "");
    }
}
