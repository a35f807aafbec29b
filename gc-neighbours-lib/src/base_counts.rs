const OTHER: u8 = 0x0;
const AT: u8 = 0x1;
const GC: u8 = 0x2;

const NCHRS: usize = 1 << 8;

const fn makeclassmap() -> [u8; NCHRS] {
    let mut arr = [OTHER; NCHRS];
    arr['G' as usize] = GC;
    arr['C' as usize] = GC;
    arr['A' as usize] = AT;
    arr['T' as usize] = AT;
    arr
}
const fn apply_lower(inarr: [u8; NCHRS]) -> [u8; NCHRS] {
    let mut arr = inarr;
    let mut i = 1;
    while i <= 26 {
        arr[i + 96] = inarr[i + 64];
        i += 1;
    }
    arr
}

/*
Precomputed mapping from ascii byte to base class
*/
const CHR_TO_CLASS: [u8; NCHRS] = apply_lower(makeclassmap());

/// Running tally of G/C, A/T and everything else (N, IUPAC codes, gaps).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BaseCounts {
    pub gc: u64,
    pub at: u64,
    pub other: u64,
}

impl BaseCounts {
    pub fn count(&mut self, data: &[u8]) {
        for c in data.iter() {
            match CHR_TO_CLASS[*c as usize] {
                GC => self.gc += 1,
                AT => self.at += 1,
                _ => self.other += 1,
            }
        }
    }
    pub fn from_bytes(data: &[u8]) -> BaseCounts {
        let mut counts = BaseCounts::default();
        counts.count(data);
        counts
    }
    pub fn total(&self) -> u64 {
        self.gc + self.at + self.other
    }
    /// GC fraction over unambiguous bases only, 0.0 if there are none.
    pub fn gc_fraction(&self) -> f64 {
        let acgt = self.gc + self.at;
        if acgt == 0 {
            0.0
        } else {
            self.gc as f64 / acgt as f64
        }
    }
}
