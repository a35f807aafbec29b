use gc_neighbours_lib::*;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    let mut file = File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

const CONTIGS: &str = "\
>gc_rich_long
GCGCGCGCGCGCGCGCGCGC
GCGCGCGCGCGCGCGCGCGC
>gc_rich_short
GCGCGCGCGCGCGCGCGCAT
>at_rich
ATATATATATATATATATAT
";

// bins at 0.0, 0.5 and 1.0, each with a single window length
const GC_DIST: &str = "\
# gc\twindow_len\tpercentile\tlower\tupper
0.0\t100\t95\t0.0\t0.2
0.5\t100\t95\t0.3\t0.7
1.0\t100\t95\t0.85\t1.0
";

#[test]
fn test_read_fasta_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "contigs.fa", CONTIGS);
    let seqs = read_fasta(&path).unwrap();
    let names: Vec<&str> = seqs.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["gc_rich_long", "gc_rich_short", "at_rich"]);
    let lengths: Vec<usize> = seqs.iter().map(|s| s.length).collect();
    assert_eq!(lengths, vec![40, 20, 20]);
    assert_eq!(seqs[0].gc, 1.0);
    assert_eq!(seqs[1].gc, 0.9);
    assert_eq!(seqs[2].gc, 0.0);
}

#[test]
fn test_read_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let res = read_fasta(&dir.path().join("missing.fa"));
    assert!(matches!(res, Err(GcError::IoError(_))));
    let res = read_gc_dist(&dir.path().join("missing.tsv"));
    assert!(matches!(res, Err(GcError::IoError(_))));
}

#[test]
fn test_end_to_end_from_files() {
    let dir = tempfile::tempdir().unwrap();
    let fasta = write_file(dir.path(), "contigs.fa", CONTIGS);
    let table = write_file(dir.path(), "gc_dist.tsv", GC_DIST);
    let mut seqs = read_fasta(&fasta).unwrap();
    let gc_dist = read_gc_dist(&table).unwrap();

    let stats = GcNeighbours::new(0)
        .run(&mut seqs, &gc_dist, 95, 2, NoProgress)
        .unwrap();
    assert_eq!(stats.rows_collected, 3);

    let rows: Vec<Vec<u8>> = seqs.iter().map(|s| s.gc_neighbours.clone().unwrap()).collect();
    // both GC rich contigs fall in the 1.0 bin envelope, the AT rich one only matches itself
    assert_eq!(rows, vec![vec![1, 1, 0], vec![1, 1, 0], vec![0, 0, 1]]);
}

#[test]
fn test_missing_percentile_fails_run() {
    let dir = tempfile::tempdir().unwrap();
    let fasta = write_file(dir.path(), "contigs.fa", CONTIGS);
    let table = write_file(dir.path(), "gc_dist.tsv", GC_DIST);
    let mut seqs = read_fasta(&fasta).unwrap();
    let gc_dist = read_gc_dist(&table).unwrap();

    let res = GcNeighbours::new(0).run(&mut seqs, &gc_dist, 99, 2, NoProgress);
    assert!(matches!(res, Err(GcError::Distribution(_))));
    assert!(seqs.iter().all(|s| s.gc_neighbours.is_none()));
}
