//! Workspace definition and helper
use std::{
    fs::create_dir_all,
    path::{Path, PathBuf},
};

use log::info;

/// Workspace, where all products of a session are generated
pub struct Workspace {
    /// Root Fullpath for this session
    pub root: PathBuf,
}

impl Workspace {
    /// Builds a new workspace, creating it if need be
    pub fn new<P: AsRef<Path>>(root: P) -> std::io::Result<Self> {
        let root = root.as_ref().to_path_buf();
        create_dir_all(&root)?;
        info!("session workspace is \"{}\"", root.display());
        Ok(Self { root })
    }
}
