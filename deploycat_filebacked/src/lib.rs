#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate log;
#[macro_use]
extern crate error_chain;

// Structs
mod container;
mod deployment;

// Utilities
mod load;
mod util;
pub use crate::load::Loaded;

use std::path::{Path, PathBuf};

use deploycat_definitions::{Deployment, Result};

/// Parse text holding a single deployment
pub fn parse(raw: &str) -> Result<Deployment> {
    load::parse(raw)
}

/// Parse every deployment in a multi-document stream
pub fn parse_all(raw: &str, strict: bool) -> Result<Loaded> {
    load::parse_all(raw, strict)
}

pub fn load_file(pth: &Path, strict: bool) -> Result<Loaded> {
    load::load_file(pth, strict)
}

pub fn load_paths(paths: &[PathBuf], strict: bool) -> Result<Loaded> {
    load::load_paths(paths, strict)
}
