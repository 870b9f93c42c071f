//! Output formatting.
//!
//! This module handles everything written out:
//! - [`skeleton`] - fixed document segments
//! - [`xml`] - address and rule entry blocks
//! - [`terminal`] - run summary on stdout

pub mod skeleton;
mod terminal;
pub mod xml;

pub use terminal::{print_summary, summary_lines};
