use std::fs::File;
use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result};
use clap::Parser;

use molextent::extent_filter::{ExtentFilter, FilterConfig};
use molextent::molecule::OutputFormat;
use molextent::paf;

/// Detect molecule extents from long-read mappings.
///
/// Reads minimap2-style PAF and emits one BED row per mapping whose extent
/// on the reference contig meets the minimum molecule size.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Input PAF file, - for stdin (.gz/.bgz accepted)
    #[clap(value_name = "PAF")]
    paf: String,

    /// Output file (stdout if not specified)
    #[clap(short = 'o', long = "output", value_name = "FILE")]
    output: Option<String>,

    /// Minimum molecule size
    #[clap(short = 'm', long = "size", default_value = "2000", value_name = "N")]
    min_size: u64,

    /// Minimum mapping quality (0 disables the check)
    #[clap(short = 'q', long = "mapq", default_value = "0", value_name = "N")]
    min_mapq: u8,

    /// Output in BED format [default]
    #[clap(long = "bed", conflicts_with = "tsv")]
    bed: bool,

    /// Output in TSV format with a header line
    #[clap(long = "tsv")]
    tsv: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let format = if args.tsv {
        OutputFormat::Tsv
    } else {
        OutputFormat::Bed
    };

    let config = FilterConfig {
        min_size: args.min_size,
        min_mapq: args.min_mapq,
        format,
    };

    let reader = paf::open_input(&args.paf)?;

    let mut writer: Box<dyn Write> = match args.output {
        Some(ref path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("cannot create output file: {path}"))?,
        )),
        None => Box::new(BufWriter::new(io::stdout())),
    };

    let stats = ExtentFilter::new(config)
        .filter_paf(reader, &mut writer)
        .with_context(|| format!("failed to filter {}", args.paf))?;

    log::info!(
        "kept {} of {} mappings (min size {}, min mapq {})",
        stats.records_out,
        stats.records_in,
        args.min_size,
        args.min_mapq
    );

    Ok(())
}
