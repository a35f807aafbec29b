use std::io::Write;

/// Receives progress from the collector thread. Reporting is best effort and
/// never influences the computed matrix.
pub trait ProgressReporter: Send {
    fn update(&mut self, processed: usize, total: usize);
    fn finish(&mut self);
}

impl<P: ProgressReporter + ?Sized> ProgressReporter for Box<P> {
    fn update(&mut self, processed: usize, total: usize) {
        (**self).update(processed, total)
    }
    fn finish(&mut self) {
        (**self).finish()
    }
}

pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn update(&mut self, _processed: usize, _total: usize) {}
    fn finish(&mut self) {}
}

/// Rewrites a single status line in place using carriage returns.
pub struct StatusLine<W: Write + Send> {
    out: W,
}

impl<W: Write + Send> StatusLine<W> {
    pub fn new(out: W) -> StatusLine<W> {
        StatusLine { out }
    }
    pub fn into_inner(self) -> W {
        self.out
    }
}

pub fn status_str(processed: usize, total: usize) -> String {
    let percent = if total == 0 {
        100.0
    } else {
        processed as f64 * 100.0 / total as f64
    };
    format!(
        "      Finished processing {} of {} ({:.2}%) contigs.",
        processed, total, percent
    )
}

impl<W: Write + Send> ProgressReporter for StatusLine<W> {
    fn update(&mut self, processed: usize, total: usize) {
        let _ = write!(self.out, "{}\r", status_str(processed, total));
        let _ = self.out.flush();
    }
    fn finish(&mut self) {
        let _ = writeln!(self.out);
        let _ = self.out.flush();
    }
}
