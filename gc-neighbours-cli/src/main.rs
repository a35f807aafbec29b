mod cli_utils;

use crate::cli_utils::{parse_and_validate_args, write_neighbours, Cli, NeighbourRunInfo};
use anyhow::{Context, Result};
use clap::Parser;
use gc_neighbours_lib::*;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::time::Instant;
use tracing::{info, Level};

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(run_info: NeighbourRunInfo) -> Result<()> {
    let start_time = Instant::now();
    info!("{}", run_info.config.get_device_str());

    let mut seqs = read_fasta(&run_info.contigs_path)
        .with_context(|| format!("Failed to read contigs from {:?}", run_info.contigs_path))?;
    let gc_dist = read_gc_dist(&run_info.gc_dist_path)
        .with_context(|| format!("Failed to read GC distribution from {:?}", run_info.gc_dist_path))?;
    info!(
        "Read {} contigs and {} GC distribution bins",
        seqs.len(),
        gc_dist.num_gc_bins()
    );

    let progress: Box<dyn ProgressReporter> = if run_info.verbosity >= 1 {
        Box::new(StatusLine::new(std::io::stderr()))
    } else {
        Box::new(NoProgress)
    };
    let config = &run_info.config;
    GcNeighbours::new(config.fixed_seq_len)
        .run(&mut seqs, &gc_dist, config.gc_dist_per, config.threads, progress)
        .context("Failed to compute GC neighbours")?;

    let out_writer = if run_info.out_path != "-" {
        Box::new(
            File::create(&run_info.out_path)
                .with_context(|| format!("Failed to create {}", run_info.out_path))?,
        ) as Box<dyn Write>
    } else {
        Box::new(std::io::stdout()) as Box<dyn Write>
    };
    let mut out_buf_writer = BufWriter::new(out_writer);
    write_neighbours(&mut out_buf_writer, &seqs)?;
    out_buf_writer.flush()?;

    info!("Completed in {}s", start_time.elapsed().as_secs_f64());
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbosity);
    let result = parse_and_validate_args(cli).and_then(run);
    if let Err(err) = result {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
