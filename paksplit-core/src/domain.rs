// paksplit_core/src/domain.rs
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct PartRow {
    pub ordinal: u64,
    pub start: u64,
    pub len: u64,
    pub path: PathBuf,
}

/// What a finished job wrote, parts in ascending ordinal order.
#[derive(Clone, Debug)]
pub struct SplitReport {
    pub dir: PathBuf,
    pub total_len: u64,
    pub parts: Vec<PartRow>,
}
