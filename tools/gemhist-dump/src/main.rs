use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use gemhist::GemHist;

#[derive(Parser, Debug)]
#[command(
    name = "gemhist-dump",
    about = "Inspect a serialized GEMHist monitoring buffer."
)]
struct Args {
    /// File containing one serialized GEMHist buffer
    input: PathBuf,

    /// Byte offset of the record's root word within the file
    #[arg(long, value_name = "BYTES", default_value_t = 0)]
    root_offset: usize,

    /// Print at most this many leading bins per field
    #[arg(long, value_name = "N", default_value_t = 16)]
    limit: usize,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let bytes = fs::read(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    tracing::debug!(len = bytes.len(), root_offset = args.root_offset, "loaded buffer");

    let hist = GemHist::from_buffer_at(&bytes, args.root_offset)
        .with_context(|| format!("parsing {}", args.input.display()))?;

    print_field("Xhist", hist.xhist_len(), hist.xhist_iter(), args.limit);
    print_field("Yhist", hist.yhist_len(), hist.yhist_iter(), args.limit);
    Ok(())
}

fn print_field(name: &str, len: usize, bins: impl Iterator<Item = u32>, limit: usize) {
    let mut total: u64 = 0;
    let mut leading = Vec::new();
    for (i, count) in bins.enumerate() {
        total += u64::from(count);
        if i < limit {
            leading.push(count.to_string());
        }
    }
    println!("{name}: {len} bins, {total} counts");
    if !leading.is_empty() {
        let ellipsis = if len > limit { " ..." } else { "" };
        println!("  [{}{}]", leading.join(" "), ellipsis);
    }
}
