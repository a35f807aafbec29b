use crate::gc_err::{GcError, Result};
use crate::sequence::Sequence;
use std::cmp::Ordering;

/// One line of a GC distribution table: the `percentile` interval of window
/// GC fractions for windows of `window_len` bases drawn from genomes with GC
/// fraction `gc`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GcDistRow {
    pub gc: f64,
    pub window_len: usize,
    pub percentile: u32,
    pub lower: f64,
    pub upper: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GcBounds {
    pub lower: f64,
    pub upper: f64,
}

impl GcBounds {
    pub fn contains(&self, gc: f64) -> bool {
        self.lower <= gc && gc <= self.upper
    }
}

struct WindowCell {
    window_len: usize,
    // sorted by percentile
    bounds: Vec<(u32, GcBounds)>,
}

struct GcBin {
    gc: f64,
    // sorted by window_len
    windows: Vec<WindowCell>,
}

/// GC distribution table, indexed by genome GC and window length.
///
/// Lookups snap to the closest key present on each axis; when two keys are
/// equally close the smaller one is used.
pub struct GcDistTable {
    bins: Vec<GcBin>,
}

fn closest_idx(keys: impl Iterator<Item = f64>, target: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, key) in keys.enumerate() {
        let dist = (key - target).abs();
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((idx, dist)),
        }
    }
    best.map(|(idx, _)| idx)
}

impl GcDistTable {
    pub fn new(mut rows: Vec<GcDistRow>) -> Result<GcDistTable> {
        if rows.is_empty() {
            return Err(GcError::BadFileFormat("GC distribution table is empty"));
        }
        if rows.iter().any(|r| !r.gc.is_finite() || !r.lower.is_finite() || !r.upper.is_finite()) {
            return Err(GcError::Distribution(
                "GC distribution table contains non-finite values".to_string(),
            ));
        }
        rows.sort_by(|a, b| {
            a.gc.partial_cmp(&b.gc)
                .unwrap_or(Ordering::Equal)
                .then(a.window_len.cmp(&b.window_len))
                .then(a.percentile.cmp(&b.percentile))
        });
        let mut bins: Vec<GcBin> = Vec::new();
        for row in rows {
            let bounds = GcBounds {
                lower: row.lower,
                upper: row.upper,
            };
            if bins.last().map_or(true, |bin| bin.gc != row.gc) {
                bins.push(GcBin {
                    gc: row.gc,
                    windows: Vec::new(),
                });
            }
            let Some(bin) = bins.last_mut() else {
                continue;
            };
            match bin.windows.last_mut() {
                Some(cell) if cell.window_len == row.window_len => {
                    // later duplicates of a percentile replace earlier ones
                    match cell.bounds.last_mut() {
                        Some((per, b)) if *per == row.percentile => *b = bounds,
                        _ => cell.bounds.push((row.percentile, bounds)),
                    }
                }
                _ => bin.windows.push(WindowCell {
                    window_len: row.window_len,
                    bounds: vec![(row.percentile, bounds)],
                }),
            }
        }
        Ok(GcDistTable { bins })
    }

    pub fn num_gc_bins(&self) -> usize {
        self.bins.len()
    }

    pub fn bounds(&self, gc: f64, window_len: usize, percentile: u32) -> Result<GcBounds> {
        let bin_idx = closest_idx(self.bins.iter().map(|b| b.gc), gc)
            .ok_or_else(|| GcError::Distribution("GC distribution table is empty".to_string()))?;
        let bin = &self.bins[bin_idx];
        let cell_idx = closest_idx(bin.windows.iter().map(|w| w.window_len as f64), window_len as f64)
            .ok_or_else(|| {
                GcError::Distribution(format!("no window lengths for GC bin {}", bin.gc))
            })?;
        let cell = &bin.windows[cell_idx];
        cell.bounds
            .iter()
            .find(|(per, _)| *per == percentile)
            .map(|(_, b)| *b)
            .ok_or_else(|| {
                GcError::Distribution(format!(
                    "percentile {} missing for GC bin {} and window length {}",
                    percentile, bin.gc, cell.window_len
                ))
            })
    }
}

/// Decides whether `unbinned` lies within the GC envelope of `core`.
pub trait GcComparator: Sync {
    fn within_dist_gc(&self, unbinned: &Sequence, core: &Sequence, fixed_seq_len: usize) -> Result<bool>;
}

impl<F> GcComparator for F
where
    F: Fn(&Sequence, &Sequence, usize) -> Result<bool> + Sync,
{
    fn within_dist_gc(&self, unbinned: &Sequence, core: &Sequence, fixed_seq_len: usize) -> Result<bool> {
        self(unbinned, core, fixed_seq_len)
    }
}

/// Distribution inputs shared read-only by every worker of a run.
pub struct DistanceParameters<'a> {
    pub gc_dist: &'a GcDistTable,
    pub gc_dist_per: u32,
}

impl<'a> DistanceParameters<'a> {
    pub fn new(gc_dist: &'a GcDistTable, gc_dist_per: u32) -> DistanceParameters<'a> {
        DistanceParameters { gc_dist, gc_dist_per }
    }
}

impl GcComparator for DistanceParameters<'_> {
    fn within_dist_gc(&self, unbinned: &Sequence, core: &Sequence, fixed_seq_len: usize) -> Result<bool> {
        let window_len = if fixed_seq_len > 0 {
            fixed_seq_len
        } else {
            unbinned.length
        };
        let bounds = self.gc_dist.bounds(core.gc, window_len, self.gc_dist_per)?;
        Ok(bounds.contains(unbinned.gc))
    }
}
