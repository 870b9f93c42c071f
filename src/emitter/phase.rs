//! Threshold-bounded repetition of entry blocks.

use super::SizedWriter;
use crate::error::{GenError, Result};
use std::io::Write;

/// Condition that ends a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    /// Stop once the total output has reached this many bytes.
    Bytes(u64),
    /// Stop after this many entries.
    Count(u64),
}

impl Limit {
    fn satisfied(&self, bytes: u64, count: u64) -> bool {
        match *self {
            Limit::Bytes(threshold) => bytes >= threshold,
            Limit::Count(threshold) => count >= threshold,
        }
    }
}

/// One repeated section of the document.
#[derive(Debug, Clone)]
pub struct Phase {
    pub name: String,
    pub limit: Limit,
    /// Optional hard cap on entries; reaching it ends the phase normally.
    pub cap: Option<u64>,
    /// Entries between forced flushes.
    pub flush_every: u64,
    /// Entries after which the run is aborted instead of growing further.
    /// Applies to [`Limit::Count`] phases too, a count above it fails.
    pub max_entries: u64,
}

impl Phase {
    pub fn new(name: &str, limit: Limit, flush_every: u64, max_entries: u64) -> Phase {
        Phase {
            name: name.to_string(),
            limit,
            cap: None,
            flush_every,
            max_entries,
        }
    }

    pub fn with_cap(mut self, cap: Option<u64>) -> Phase {
        self.cap = cap;
        self
    }
}

/// Write blocks produced by `next_block` until the phase limit holds.
///
/// `next_block` gets the zero-based entry index and returns one complete
/// block. Blocks are written whole or not at all. Returns the entry count.
pub fn run_phase<W, F>(out: &mut SizedWriter<W>, phase: &Phase, mut next_block: F) -> Result<u64>
where
    W: Write,
    F: FnMut(u64) -> Result<String>,
{
    let start_bytes = out.bytes();
    log::info!(
        "Phase '{}' start at {} bytes, limit {:?}",
        phase.name,
        start_bytes,
        phase.limit
    );

    let mut count = 0u64;
    while !phase.limit.satisfied(out.bytes(), count) {
        if phase.cap.is_some_and(|cap| count >= cap) {
            log::info!("Phase '{}' reached cap of {} entries", phase.name, count);
            break;
        }
        if count >= phase.max_entries {
            return Err(GenError::IterationLimit {
                phase: phase.name.clone(),
                limit: phase.max_entries,
            });
        }

        let block = next_block(count)?;
        log::trace!("{} #{count}: {} bytes", phase.name, block.len());
        out.write_str(&block)?;
        count += 1;

        if phase.flush_every > 0 && count % phase.flush_every == 0 {
            out.flush()?;
            log::debug!(
                "Phase '{}': {} entries, {} bytes written",
                phase.name,
                count,
                out.bytes()
            );
        }
    }

    log::info!(
        "Phase '{}' done: {} entries, {} bytes",
        phase.name,
        count,
        out.bytes() - start_bytes
    );
    Ok(count)
}
