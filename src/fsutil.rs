//! Filtered, sorted listing of immediate directory children.

use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Filter options for [`list_dir`]. The default skips dot-prefixed entries
/// and keeps both files and directories.
#[derive(Debug, Clone)]
pub struct ListOptions {
    /// Skip regular files.
    pub no_files: bool,
    /// Skip directories.
    pub no_dirs: bool,
    /// Skip entries whose name starts with a `.`.
    pub no_dot: bool,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self { no_files: false, no_dirs: false, no_dot: true }
    }
}

/// One directory child: its file name and its full path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntryInfo {
    pub name: String,
    pub path: PathBuf,
}

/// Lists the immediate children of `path`, sorted by file name.
pub fn list_dir(path: impl AsRef<Path>, options: &ListOptions) -> io::Result<Vec<DirEntryInfo>> {
    let mut content = Vec::new();
    for entry in WalkDir::new(path).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            e.into_io_error().unwrap_or_else(|| io::Error::other("walkdir loop"))
        })?;

        if options.no_files && entry.file_type().is_file() {
            continue;
        }
        if options.no_dirs && entry.file_type().is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if options.no_dot && name.starts_with('.') {
            continue;
        }
        content.push(DirEntryInfo { name, path: entry.path().to_path_buf() });
    }
    Ok(content)
}
