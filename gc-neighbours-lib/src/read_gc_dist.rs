use crate::distributions::{GcDistRow, GcDistTable};
use crate::gc_err::{GcError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

const N_COLUMNS: usize = 5;

fn parse_fraction(field: &str, what: &str, line_no: usize) -> Result<f64> {
    let val: f64 = field
        .parse()
        .map_err(|_| GcError::parse(line_no, format!("{} must be a number, got '{}'", what, field)))?;
    if !(0.0..=1.0).contains(&val) {
        return Err(GcError::parse(
            line_no,
            format!("{} must be a fraction between 0 and 1, got {}", what, val),
        ));
    }
    Ok(val)
}

fn parse_row(line: &str, line_no: usize) -> Result<GcDistRow> {
    let lineparts: Vec<&str> = line.split('\t').map(|p| p.trim()).collect();
    if lineparts.len() != N_COLUMNS {
        return Err(GcError::parse(
            line_no,
            format!(
                "expected {} tab separated columns <gc> <window_len> <percentile> <lower> <upper>, got {}",
                N_COLUMNS,
                lineparts.len()
            ),
        ));
    }
    let gc = parse_fraction(lineparts[0], "gc", line_no)?;
    let window_len: usize = lineparts[1].parse().map_err(|_| {
        GcError::parse(line_no, "window length must be an unsigned integer")
    })?;
    let percentile: u32 = lineparts[2]
        .parse()
        .map_err(|_| GcError::parse(line_no, "percentile must be an unsigned integer"))?;
    if percentile > 100 {
        return Err(GcError::parse(line_no, "percentile must be between 0 and 100"));
    }
    let lower = parse_fraction(lineparts[3], "lower bound", line_no)?;
    let upper = parse_fraction(lineparts[4], "upper bound", line_no)?;
    if lower > upper {
        return Err(GcError::parse(line_no, "lower bound exceeds upper bound"));
    }
    Ok(GcDistRow {
        gc,
        window_len,
        percentile,
        lower,
        upper,
    })
}

pub fn read_gc_dist(fname: &Path) -> Result<GcDistTable> {
    let file = File::open(fname)?;
    read_gc_dist_from(BufReader::new(file))
}

pub fn read_gc_dist_from<R: BufRead>(reader: R) -> Result<GcDistTable> {
    let mut rows: Vec<GcDistRow> = Vec::new();
    for (idx, line_r) in reader.lines().enumerate() {
        let line = line_r?;
        let line = line.trim_end();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        rows.push(parse_row(line, idx + 1)?);
    }
    GcDistTable::new(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_table() {
        let data = "# gc\twindow\tper\tlower\tupper\n0.5\t1000\t95\t0.4\t0.6\n\n0.5\t1000\t99\t0.35\t0.65\n";
        let table = read_gc_dist_from(Cursor::new(data)).unwrap();
        assert_eq!(table.num_gc_bins(), 1);
        let b = table.bounds(0.5, 1000, 99).unwrap();
        assert_eq!((b.lower, b.upper), (0.35, 0.65));
    }
    #[test]
    fn test_wrong_column_count() {
        let res = read_gc_dist_from(Cursor::new("0.5\t1000\t95\t0.4\n"));
        assert!(matches!(res, Err(GcError::Parse { line: 1, .. })));
    }
    #[test]
    fn test_bad_numbers() {
        let res = read_gc_dist_from(Cursor::new("# header\n0.5\tlong\t95\t0.4\t0.6\n"));
        assert!(matches!(res, Err(GcError::Parse { line: 2, .. })));
        let res = read_gc_dist_from(Cursor::new("1.5\t1000\t95\t0.4\t0.6\n"));
        assert!(matches!(res, Err(GcError::Parse { line: 1, .. })));
        let res = read_gc_dist_from(Cursor::new("0.5\t1000\t101\t0.4\t0.6\n"));
        assert!(matches!(res, Err(GcError::Parse { line: 1, .. })));
    }
    #[test]
    fn test_inverted_bounds() {
        let res = read_gc_dist_from(Cursor::new("0.5\t1000\t95\t0.6\t0.4\n"));
        assert!(matches!(res, Err(GcError::Parse { line: 1, .. })));
    }
    #[test]
    fn test_empty_table() {
        let res = read_gc_dist_from(Cursor::new("# nothing here\n\n"));
        assert!(matches!(res, Err(GcError::BadFileFormat(_))));
    }
}
