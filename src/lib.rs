//! Prime counting over a file of integers, sequentially and across a pool of
//! workers that each own one contiguous chunk of the input.

pub mod config;
pub mod count;
pub mod io;
pub mod parallel;
pub mod partition;
pub mod prime;
pub mod report;

pub use count::{count_chunk, count_sequential};
pub use parallel::{count_parallel, ParallelCount, ParallelCounter};
pub use partition::{partition, Chunk};
pub use prime::is_prime;
