pub struct Sequence {
    pub name: String,
    // position within the input collection
    pub index: usize,
    pub length: usize,
    // fraction of G/C over unambiguous bases
    pub gc: f64,
    // one flag per input sequence, attached once a run completes
    pub gc_neighbours: Option<Vec<u8>>,
}

impl Sequence {
    pub fn new(name: impl Into<String>, index: usize, length: usize, gc: f64) -> Sequence {
        Sequence {
            name: name.into(),
            index,
            length,
            gc,
            gc_neighbours: None,
        }
    }
}

pub enum WorkItem<'a> {
    Item(usize, &'a Sequence),
    Stop,
}

pub enum ResultItem {
    Item(usize, Vec<u8>),
    Done,
}
