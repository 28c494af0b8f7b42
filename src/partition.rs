use std::ops::Range;

/// Half-open index range `[start, end)` into the number sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk {
    pub start: usize,
    pub end: usize,
}

impl Chunk {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Number of workers that will actually receive a chunk: never more than
/// there are items, never fewer than one.
pub fn effective_workers(len: usize, workers: usize) -> usize {
    workers.min(len).max(1)
}

/// Splits `0..len` into at most `workers` contiguous chunks of
/// `ceil(len / workers)` items, the last one clipped to `len`.
///
/// Returns no chunks when `len` is zero.
pub fn partition(len: usize, workers: usize) -> Vec<Chunk> {
    if len == 0 {
        return Vec::new();
    }

    let workers = effective_workers(len, workers);
    let chunk_size = len.div_ceil(workers);

    (0..len)
        .step_by(chunk_size)
        .map(|start| Chunk::new(start, (start + chunk_size).min(len)))
        .collect()
}
