use crate::distributions::{DistanceParameters, GcComparator, GcDistTable};
use crate::gc_err::{GcError, Result};
use crate::progress::ProgressReporter;
use crate::result_matrix::ResultMatrix;
use crate::sequence::{ResultItem, Sequence, WorkItem};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::thread;
use tracing::{debug, error, info};

const RESULT_QUEUE_SIZE: usize = 64;

/// Bookkeeping of a completed run, mostly of interest to tests and logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunStats {
    // rows computed by each worker, in spawn order
    pub items_per_worker: Vec<usize>,
    pub stops_consumed: usize,
    pub rows_collected: usize,
    pub done_consumed: bool,
}

struct WorkerStats {
    items: usize,
    consumed_stop: bool,
}

struct CollectorStats {
    rows: usize,
    consumed_done: bool,
}

/// Returns `(core, unbinned)`. The longer sequence is the core; on equal
/// lengths `seq_j` is the core.
pub fn orient<'a>(seq_i: &'a Sequence, seq_j: &'a Sequence) -> (&'a Sequence, &'a Sequence) {
    if seq_i.length > seq_j.length {
        (seq_i, seq_j)
    } else {
        (seq_j, seq_i)
    }
}

/// Flags of `seq_i` against every sequence in `seqs`, itself included.
pub fn neighbour_row<C: GcComparator + ?Sized>(
    comparator: &C,
    seqs: &[Sequence],
    seq_i: &Sequence,
    fixed_seq_len: usize,
) -> Result<Vec<u8>> {
    let mut row = vec![0_u8; seqs.len()];
    for (j, seq_j) in seqs.iter().enumerate() {
        let (core, unbinned) = orient(seq_i, seq_j);
        if comparator.within_dist_gc(unbinned, core, fixed_seq_len)? {
            row[j] = 1;
        }
    }
    Ok(row)
}

fn worker_thread<C: GcComparator>(
    worker_id: usize,
    comparator: &C,
    fixed_seq_len: usize,
    seqs: &[Sequence],
    recv: crossbeam_channel::Receiver<WorkItem>,
    dest: mpsc::SyncSender<ResultItem>,
    abort: &AtomicBool,
) -> Result<WorkerStats> {
    let mut stats = WorkerStats {
        items: 0,
        consumed_stop: false,
    };
    while !abort.load(Ordering::Relaxed) {
        match recv.recv() {
            Ok(WorkItem::Item(index, seq_i)) => {
                let row = match neighbour_row(comparator, seqs, seq_i, fixed_seq_len) {
                    Ok(row) => row,
                    Err(err) => {
                        abort.store(true, Ordering::Relaxed);
                        error!(worker_id, index, name = %seq_i.name, "comparison failed: {}", err);
                        return Err(err);
                    }
                };
                dest.send(ResultItem::Item(index, row))?;
                stats.items += 1;
            }
            Ok(WorkItem::Stop) => {
                stats.consumed_stop = true;
                break;
            }
            // queue drained and closed
            Err(_) => break,
        }
    }
    debug!(worker_id, items = stats.items, "worker finished");
    Ok(stats)
}

fn collector_thread<P: ProgressReporter>(
    n_seqs: usize,
    recv: mpsc::Receiver<ResultItem>,
    mut progress: P,
) -> (ResultMatrix, CollectorStats) {
    let mut matrix = ResultMatrix::new(n_seqs);
    let mut stats = CollectorStats {
        rows: 0,
        consumed_done: false,
    };
    for item in recv.iter() {
        match item {
            ResultItem::Item(index, row) => {
                matrix.set(index, row);
                stats.rows += 1;
                progress.update(stats.rows, n_seqs);
            }
            ResultItem::Done => {
                stats.consumed_done = true;
                break;
            }
        }
    }
    progress.finish();
    (matrix, stats)
}

/// Computes the GC neighbour matrix of a set of sequences on a fixed pool of
/// worker threads.
pub struct GcNeighbours {
    fixed_seq_len: usize,
}

impl GcNeighbours {
    pub fn new(fixed_seq_len: usize) -> GcNeighbours {
        GcNeighbours { fixed_seq_len }
    }

    pub fn fixed_seq_len(&self) -> usize {
        self.fixed_seq_len
    }

    pub fn run<P: ProgressReporter>(
        &self,
        seqs: &mut [Sequence],
        gc_dist: &GcDistTable,
        gc_dist_per: u32,
        threads: usize,
        progress: P,
    ) -> Result<RunStats> {
        let params = DistanceParameters::new(gc_dist, gc_dist_per);
        self.run_with(seqs, &params, threads, progress)
    }

    /// Fills `gc_neighbours` of every sequence, or leaves all of them untouched
    /// on error.
    pub fn run_with<C: GcComparator, P: ProgressReporter>(
        &self,
        seqs: &mut [Sequence],
        comparator: &C,
        threads: usize,
        progress: P,
    ) -> Result<RunStats> {
        if threads == 0 {
            return Err(GcError::Config("thread count must be at least 1"));
        }
        if seqs.is_empty() {
            return Err(GcError::Config("no sequences to compare"));
        }
        let n_seqs = seqs.len();
        let fixed_seq_len = self.fixed_seq_len;
        let shared: &[Sequence] = seqs;

        let (work_send, work_recv): (
            crossbeam_channel::Sender<WorkItem>,
            crossbeam_channel::Receiver<WorkItem>,
        ) = crossbeam_channel::unbounded();
        let (result_send, result_recv): (mpsc::SyncSender<ResultItem>, mpsc::Receiver<ResultItem>) =
            mpsc::sync_channel(RESULT_QUEUE_SIZE);
        for (index, seq) in shared.iter().enumerate() {
            work_send.send(WorkItem::Item(index, seq))?;
        }
        for _ in 0..threads {
            work_send.send(WorkItem::Stop)?;
        }
        drop(work_send);

        debug!(n_seqs, threads, fixed_seq_len, "launching GC neighbour workers");
        let abort = AtomicBool::new(false);
        let (worker_results, collected) = thread::scope(|s| {
            let collector = s.spawn(move || collector_thread(n_seqs, result_recv, progress));
            let workers: Vec<_> = (0..threads)
                .map(|worker_id| {
                    let trecv = work_recv.clone();
                    let tdest = result_send.clone();
                    let tabort = &abort;
                    s.spawn(move || {
                        worker_thread(worker_id, comparator, fixed_seq_len, shared, trecv, tdest, tabort)
                    })
                })
                .collect();
            let worker_results: Vec<Result<WorkerStats>> = workers
                .into_iter()
                .map(|handle| {
                    handle.join().unwrap_or_else(|_| {
                        abort.store(true, Ordering::Relaxed);
                        Err(GcError::WorkerPanicked)
                    })
                })
                .collect();
            // workers are gone, nobody else writes to the result channel
            let done_sent = result_send.send(ResultItem::Done);
            drop(result_send);
            let collected = match collector.join() {
                Ok(collected) => done_sent.map(|_| collected).map_err(GcError::from),
                Err(_) => Err(GcError::WorkerPanicked),
            };
            (worker_results, collected)
        });
        // items left behind by an aborted run still borrow the sequences
        drop(work_recv);

        let mut stats = RunStats {
            items_per_worker: Vec::with_capacity(threads),
            stops_consumed: 0,
            rows_collected: 0,
            done_consumed: false,
        };
        for res in worker_results {
            let worker = res?;
            stats.items_per_worker.push(worker.items);
            stats.stops_consumed += worker.consumed_stop as usize;
        }
        let (matrix, collector) = collected?;
        stats.rows_collected = collector.rows;
        stats.done_consumed = collector.consumed_done;

        let rows = matrix.into_rows()?;
        for (seq, row) in seqs.iter_mut().zip(rows) {
            seq.gc_neighbours = Some(row);
        }
        info!(n_seqs, threads, "computed GC neighbours");
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::NoProgress;

    fn seqs_of_lengths(lengths: &[usize]) -> Vec<Sequence> {
        lengths
            .iter()
            .enumerate()
            .map(|(i, len)| Sequence::new(format!("seq{}", i), i, *len, 0.5))
            .collect()
    }

    #[test]
    fn test_orient_longer_is_core() {
        let seqs = seqs_of_lengths(&[100, 50]);
        let (core, unbinned) = orient(&seqs[0], &seqs[1]);
        assert_eq!((core.index, unbinned.index), (0, 1));
        let (core, unbinned) = orient(&seqs[1], &seqs[0]);
        assert_eq!((core.index, unbinned.index), (0, 1));
    }
    #[test]
    fn test_orient_tie_uses_other_as_core() {
        let seqs = seqs_of_lengths(&[70, 70]);
        let (core, unbinned) = orient(&seqs[0], &seqs[1]);
        assert_eq!((core.index, unbinned.index), (1, 0));
        let (core, unbinned) = orient(&seqs[1], &seqs[0]);
        assert_eq!((core.index, unbinned.index), (0, 1));
    }
    #[test]
    fn test_neighbour_row_includes_self() {
        let seqs = seqs_of_lengths(&[10, 20, 30]);
        // only the self comparison has core == unbinned
        let cmp = |u: &Sequence, c: &Sequence, _: usize| -> Result<bool> { Ok(u.index == c.index) };
        let row = neighbour_row(&cmp, &seqs, &seqs[1], 0).unwrap();
        assert_eq!(row, vec![0, 1, 0]);
    }
    #[test]
    fn test_neighbour_row_passes_fixed_seq_len() {
        let seqs = seqs_of_lengths(&[10, 20]);
        let cmp = |_: &Sequence, _: &Sequence, fixed: usize| -> Result<bool> { Ok(fixed == 500) };
        assert_eq!(neighbour_row(&cmp, &seqs, &seqs[0], 500).unwrap(), vec![1, 1]);
        assert_eq!(neighbour_row(&cmp, &seqs, &seqs[0], 0).unwrap(), vec![0, 0]);
    }
    #[test]
    fn test_zero_threads_rejected() {
        let mut seqs = seqs_of_lengths(&[10]);
        let cmp = |_: &Sequence, _: &Sequence, _: usize| -> Result<bool> { Ok(true) };
        let res = GcNeighbours::new(0).run_with(&mut seqs, &cmp, 0, NoProgress);
        assert!(matches!(res, Err(GcError::Config(_))));
        assert!(seqs[0].gc_neighbours.is_none());
    }
    #[test]
    fn test_empty_input_rejected() {
        let mut seqs: Vec<Sequence> = Vec::new();
        let cmp = |_: &Sequence, _: &Sequence, _: usize| -> Result<bool> { Ok(true) };
        let res = GcNeighbours::new(0).run_with(&mut seqs, &cmp, 4, NoProgress);
        assert!(matches!(res, Err(GcError::Config(_))));
    }
}
