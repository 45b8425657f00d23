/// One planned contiguous slice of the source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PartPlan {
    pub ordinal: u64,
    pub start: u64,
    pub len: u64,
}

/// Partition `total_len` bytes into `max(1, ceil(total_len / chunk_size))`
/// slices. Every slice except the last is exactly `chunk_size` long; an
/// evenly divisible source never gets a trailing empty slice, and an empty
/// source still yields one empty slice so concatenation round-trips.
pub fn plan_parts(total_len: u64, chunk_size: u64) -> Vec<PartPlan> {
    assert!(chunk_size > 0, "chunk size must be positive");
    let mut parts = Vec::new();
    let mut start = 0u64;
    loop {
        let len = chunk_size.min(total_len - start);
        parts.push(PartPlan {
            ordinal: parts.len() as u64,
            start,
            len,
        });
        start += len;
        if start >= total_len {
            break;
        }
    }
    parts
}
