#![forbid(unsafe_code)]
//! Filesystem and process helpers for distship.

pub mod error;
pub mod fs;
pub mod process;
