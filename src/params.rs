// src/params.rs
use std::path::PathBuf;

use crate::config::options::AppOptions;

#[derive(Clone, Debug, Default)]
pub struct Params {
    pub snapshots: Vec<PathBuf>,     // saved #app markup, replayed in order
    pub app: AppOptions,             // capture + export settings
    pub quiet: bool,                 // no per-snapshot lines
}

impl Params {
    pub fn new() -> Self { Self::default() }
}
