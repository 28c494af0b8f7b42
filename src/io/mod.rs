use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use memmap2::{Mmap, MmapOptions};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

enum Contents {
    Mapped(Mmap),
    Owned(Vec<u8>),
}

/// Read-only view of an input file's bytes.
///
/// Regular files are memory-mapped. Pipes, character devices and procfs
/// entries report a zero length, so they are read to the end instead.
pub struct NumberReader {
    contents: Contents,
}

impl NumberReader {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut file = File::open(path)
            .with_context(|| format!("Failed to open input file: {}", path.display()))?;

        let metadata = file.metadata()?;
        if metadata.is_dir() {
            anyhow::bail!("Input path is a directory: {}", path.display());
        }

        if !metadata.is_file() {
            let mut buffer = Vec::new();
            file.read_to_end(&mut buffer)
                .with_context(|| format!("Failed to read input file: {}", path.display()))?;
            debug!("Read {} bytes from non-regular file", buffer.len());
            return Ok(Self {
                contents: Contents::Owned(buffer),
            });
        }

        // Mapping a zero-length file fails on some platforms
        if metadata.len() == 0 {
            return Ok(Self {
                contents: Contents::Owned(Vec::new()),
            });
        }

        let mmap = unsafe {
            MmapOptions::new()
                .map(&file)
                .with_context(|| "Failed to memory-map input file")?
        };

        Ok(Self {
            contents: Contents::Mapped(mmap),
        })
    }

    pub fn bytes(&self) -> &[u8] {
        match &self.contents {
            Contents::Mapped(mmap) => &mmap[..],
            Contents::Owned(buffer) => buffer.as_slice(),
        }
    }

    pub fn numbers(&self) -> Vec<i64> {
        let numbers = parse_numbers(self.bytes());
        debug!(
            "Parsed {} numbers from {} bytes",
            numbers.len(),
            self.bytes().len()
        );
        numbers
    }
}

/// Reads every number from the file at `path`.
pub fn read_numbers<P: AsRef<Path>>(path: P) -> Result<Vec<i64>> {
    Ok(NumberReader::new(path)?.numbers())
}

/// Extracts signed integers from arbitrary text.
///
/// A number is a maximal run of ASCII digits, negative when the byte right
/// before it is `-`. Every other byte separates numbers, so `--5` gives `-5`,
/// `5-3` gives `5` and `-3`, and a lone `-` gives nothing. Runs that do not
/// fit in an `i64` are skipped.
pub fn parse_numbers(input: &[u8]) -> Vec<i64> {
    let mut numbers = Vec::new();
    let mut pos = 0;

    while pos < input.len() {
        if !input[pos].is_ascii_digit() {
            pos += 1;
            continue;
        }

        let start = pos;
        while pos < input.len() && input[pos].is_ascii_digit() {
            pos += 1;
        }
        let negative = start > 0 && input[start - 1] == b'-';

        if let Some(value) = parse_digits(&input[start..pos], negative) {
            numbers.push(value);
        }
    }

    numbers
}

// Accumulates toward the sign so i64::MIN parses
fn parse_digits(digits: &[u8], negative: bool) -> Option<i64> {
    let mut value: i64 = 0;
    for &digit in digits {
        let digit = i64::from(digit - b'0');
        value = value.checked_mul(10)?;
        value = if negative {
            value.checked_sub(digit)?
        } else {
            value.checked_add(digit)?
        };
    }
    Some(value)
}

pub fn create_progress_bar(total_chunks: usize) -> ProgressBar {
    let pb = ProgressBar::new(total_chunks as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} chunks")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    pb
}
