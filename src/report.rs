use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

pub const MISMATCH_WARNING: &str = "Warning: counts do not match between modes.";

/// Prime count and wall time of one counting pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub primes: u64,
    pub elapsed: Duration,
}

/// Everything printed after a successful run.
#[derive(Debug, Clone)]
pub struct BenchReport {
    pub input: PathBuf,
    pub total_numbers: usize,
    pub single: Timing,
    pub multi: Timing,
    pub workers: usize,
}

impl BenchReport {
    pub fn counts_match(&self) -> bool {
        self.single.primes == self.multi.primes
    }
}

pub fn as_millis(elapsed: Duration) -> f64 {
    elapsed.as_nanos() as f64 / 1_000_000.0
}

impl fmt::Display for BenchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Input file: {}", self.input.display())?;
        writeln!(f, "Total numbers parsed: {}", self.total_numbers)?;
        writeln!(f)?;
        writeln!(f, "Single-thread:")?;
        writeln!(f, "  Prime count: {}", self.single.primes)?;
        writeln!(f, "  Elapsed time: {:.3} ms", as_millis(self.single.elapsed))?;
        writeln!(f)?;
        writeln!(f, "Multi-thread ({} threads):", self.workers)?;
        writeln!(f, "  Prime count: {}", self.multi.primes)?;
        write!(f, "  Elapsed time: {:.3} ms", as_millis(self.multi.elapsed))?;

        if !self.counts_match() {
            writeln!(f)?;
            writeln!(f)?;
            write!(f, "{}", MISMATCH_WARNING)?;
        }
        Ok(())
    }
}
