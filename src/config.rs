use tracing::debug;

/// Worker count for the parallel pass, resolved from an optional
/// user-provided value and an injected host default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerConfig {
    pub workers: usize,
    /// True when the requested value was absent or unusable.
    pub defaulted: bool,
}

impl WorkerConfig {
    /// Uses `requested` when it parses as an integer of at least 1, otherwise
    /// falls back to `default` (itself floored at 1).
    pub fn resolve(requested: Option<&str>, default: usize) -> Self {
        match requested.and_then(parse_worker_count) {
            Some(workers) => Self {
                workers,
                defaulted: false,
            },
            None => {
                if let Some(text) = requested {
                    debug!("Ignoring invalid worker count {:?}, using {}", text, default);
                }
                Self {
                    workers: default.max(1),
                    defaulted: true,
                }
            }
        }
    }

    /// Same as [`WorkerConfig::resolve`] with the host's CPU count as default.
    pub fn from_host(requested: Option<&str>) -> Self {
        Self::resolve(requested, default_workers())
    }
}

/// Number of parallel execution units on this host.
pub fn default_workers() -> usize {
    num_cpus::get()
}

fn parse_worker_count(text: &str) -> Option<usize> {
    match text.trim().parse::<i64>() {
        Ok(n) if n >= 1 => usize::try_from(n).ok(),
        _ => None,
    }
}
