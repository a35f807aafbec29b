use crate::base_counts::BaseCounts;
use crate::gc_err::{GcError, Result};
use crate::sequence::Sequence;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

const READ_BUF_CAPACITY: usize = 1 << 18;

struct RecordBuilder {
    name: String,
    length: usize,
    counts: BaseCounts,
}

impl RecordBuilder {
    fn finish(self, index: usize) -> Sequence {
        Sequence::new(self.name, index, self.length, self.counts.gc_fraction())
    }
}

pub fn read_fasta(fname: &Path) -> Result<Vec<Sequence>> {
    let file = File::open(fname)?;
    read_fasta_from(BufReader::with_capacity(READ_BUF_CAPACITY, file))
}

pub fn read_fasta_from<R: BufRead>(reader: R) -> Result<Vec<Sequence>> {
    let mut seqs: Vec<Sequence> = Vec::new();
    let mut cur: Option<RecordBuilder> = None;
    for linerd in reader.lines() {
        let line = linerd?;
        let line = line.trim_end();
        if let Some(header) = line.strip_prefix('>') {
            let name = header.split_whitespace().next().unwrap_or("");
            if name.is_empty() {
                return Err(GcError::BadFileFormat(
                    "> must be followed by sequence name",
                ));
            }
            if let Some(prev) = cur.take() {
                let index = seqs.len();
                seqs.push(prev.finish(index));
            }
            cur = Some(RecordBuilder {
                name: name.to_string(),
                length: 0,
                counts: BaseCounts::default(),
            });
        } else if !line.is_empty() {
            //catch this error to skip invalid files
            let record = cur
                .as_mut()
                .ok_or(GcError::BadFileFormat("fasta file needs to start with >"))?;
            record.length += line.len();
            record.counts.count(line.as_bytes());
        }
    }
    if let Some(last) = cur {
        let index = seqs.len();
        seqs.push(last.finish(index));
    }
    Ok(seqs)
}
