//! Config generators.
//!
//! Three generators share the host sequencer, the size-bounded emitter and
//! the XML templates:
//! - [`named`] - size-targeted, minimal skeleton, any/any rules
//! - [`massive`] - count-driven, rules reference address objects round-robin
//! - [`template`] - size-targeted, full export skeleton, optional device group

pub mod massive;
pub mod named;
pub mod template;

use crate::emitter::SizedWriter;
use crate::error::{GenError, Result};
use crate::models::Ipv4;
use regex::Regex;
use serde::Serialize;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Instant;

pub use massive::MassiveOptions;
pub use named::NamedOptions;
pub use template::TemplateOptions;

/// Per-phase safety bound used when none is configured.
pub const DEFAULT_MAX_ENTRIES: u64 = 100_000_000;

/// Which generator produced a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Named,
    Massive,
    Template,
}

/// Outcome of one generation run.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub variant: Variant,
    pub file: PathBuf,
    /// Final size of the file on disk.
    pub bytes: u64,
    pub target_bytes: Option<u64>,
    pub base_network: Ipv4,
    pub address_objects: u64,
    pub rules: u64,
    /// Device-group rules, when that section was generated.
    pub dg_rules: Option<u64>,
    pub src_members: Option<u64>,
    pub dst_members: Option<u64>,
    pub elapsed_secs: f64,
    pub finished_at: String,
}

/// Regex for rule, object and device-group names.
static NAME_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_name_regex() -> &'static Regex {
    NAME_REGEX
        .get_or_init(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9 ._-]*$").expect("Invalid Regex"))
}

/// Names must start alphanumeric and hold only letters, digits, space, `.`, `_`, `-`.
pub(crate) fn check_name(what: &str, value: &str) -> Result<()> {
    if get_name_regex().is_match(value) {
        Ok(())
    } else {
        Err(GenError::Config(format!(
            "{what} '{value}' must start with a letter or digit and contain only \
             letters, digits, spaces, '.', '_' or '-'"
        )))
    }
}

pub(crate) fn check_flush_every(flush_every: u64) -> Result<()> {
    if flush_every == 0 {
        return Err(GenError::Config("--flush-every must be > 0".to_string()));
    }
    Ok(())
}

pub(crate) fn check_size(target_bytes: u64, addr_fill_percent: f64) -> Result<()> {
    if target_bytes == 0 {
        return Err(GenError::Config("target size must be > 0".to_string()));
    }
    if !(0.0..=100.0).contains(&addr_fill_percent) {
        return Err(GenError::Config(format!(
            "--addr-fill-percent must be between 0 and 100, got {addr_fill_percent}"
        )));
    }
    Ok(())
}

/// Share of `target_bytes` given to address objects, truncated.
pub fn fill_threshold(target_bytes: u64, addr_fill_percent: f64) -> u64 {
    (target_bytes as f64 * (addr_fill_percent / 100.0)) as u64
}

/// Flush, release the file and read back its size on disk.
pub(crate) fn close_output(out: SizedWriter<File>, path: &Path) -> Result<u64> {
    let counted = out.bytes();
    let file = out.finish()?;
    file.sync_all()?;
    drop(file);
    let on_disk = std::fs::metadata(path)?.len();
    if on_disk != counted {
        log::warn!(
            "Counted {counted} bytes but {on_disk} on disk for {}",
            path.display()
        );
    }
    Ok(on_disk)
}

pub(crate) fn elapsed_since(started: Instant) -> (f64, String) {
    (
        started.elapsed().as_secs_f64(),
        chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
    )
}
