use anyhow::Result;
use clap::Parser;
use gc_neighbours_lib::*;
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "gc-neighbours")]
#[command(version, about = "Compute the GC-content neighbour matrix of a set of contigs", long_about = None)]
pub struct Cli {
    /// Contigs to compare (FASTA)
    pub contigs: PathBuf,

    /// GC distribution table: <gc> <window_len> <percentile> <lower> <upper>, tab separated
    pub gc_dist: PathBuf,

    /// Percentile of the GC distribution used as acceptance envelope
    #[arg(short = 'p', long, default_value_t = DEFAULT_GC_DIST_PER)]
    pub percentile: u32,

    /// Fixed window length used for distribution lookups (0 = length of the shorter contig)
    #[arg(short = 'l', long, default_value_t = 0)]
    pub fixed_seq_len: usize,

    /// Worker threads (0 = all available cores)
    #[arg(short = 't', long, default_value_t = 0)]
    pub threads: usize,

    /// Verbosity level (0=quiet, 1=normal, 2=verbose)
    #[arg(short = 'v', long, default_value_t = 1)]
    pub verbosity: u8,

    /// Output file, '-' for stdout
    #[arg(short = 'o', long, default_value = "-")]
    pub output: String,
}

pub struct NeighbourRunInfo {
    pub contigs_path: PathBuf,
    pub gc_dist_path: PathBuf,
    pub out_path: String,
    pub verbosity: u8,
    pub config: RunConfig,
}

pub fn parse_and_validate_args(cli: Cli) -> Result<NeighbourRunInfo> {
    let config = RunConfig::new(cli.threads, cli.percentile, cli.fixed_seq_len)?;
    Ok(NeighbourRunInfo {
        contigs_path: cli.contigs,
        gc_dist_path: cli.gc_dist,
        out_path: cli.output,
        verbosity: cli.verbosity,
        config,
    })
}

/// One tab separated line per contig: its name followed by its neighbour flags.
pub fn write_neighbours<W: Write>(out: &mut W, seqs: &[Sequence]) -> Result<()> {
    for seq in seqs {
        write!(out, "{}", seq.name)?;
        if let Some(row) = &seq.gc_neighbours {
            for flag in row {
                write!(out, "\t{}", flag)?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::parse_from(["gc-neighbours", "contigs.fa", "gc_dist.tsv"]);
        assert_eq!(cli.percentile, DEFAULT_GC_DIST_PER);
        assert_eq!(cli.output, "-");
        let info = parse_and_validate_args(cli).unwrap();
        assert!(info.config.threads >= 1);
        assert_eq!(info.config.fixed_seq_len, 0);
        assert_eq!(info.verbosity, 1);
    }
    #[test]
    fn test_parse_options() {
        let cli = Cli::parse_from([
            "gc-neighbours", "contigs.fa", "gc_dist.tsv", "-p", "99", "-l", "5000", "-t", "4", "-v", "0", "-o",
            "out.tsv",
        ]);
        let info = parse_and_validate_args(cli).unwrap();
        assert_eq!(info.config.threads, 4);
        assert_eq!(info.config.gc_dist_per, 99);
        assert_eq!(info.config.fixed_seq_len, 5000);
        assert_eq!(info.verbosity, 0);
        assert_eq!(info.out_path, "out.tsv");
    }
    #[test]
    fn test_bad_percentile() {
        let cli = Cli::parse_from(["gc-neighbours", "contigs.fa", "gc_dist.tsv", "-p", "150"]);
        assert!(parse_and_validate_args(cli).is_err());
    }
    #[test]
    fn test_write_neighbours() {
        let mut seqs = vec![Sequence::new("a", 0, 10, 0.5), Sequence::new("b", 1, 10, 0.5)];
        seqs[0].gc_neighbours = Some(vec![1, 0]);
        seqs[1].gc_neighbours = Some(vec![0, 1]);
        let mut out: Vec<u8> = Vec::new();
        write_neighbours(&mut out, &seqs).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "a\t1\t0\nb\t0\t1\n");
    }
}
