use std::{
    fs::DirEntry,
    io::Result,
    path::{Path, PathBuf},
    time::SystemTime,
};

/// One directory entry, read once and dropped after the sweep decides on it.
#[derive(Debug, Clone)]
pub struct FileCandidate {
    /// Base name, lossily decoded for matching
    pub name: String,
    pub absolute_path: PathBuf,
    /// Symlinks are never directories here; they are not followed.
    pub is_dir: bool,
    /// Last modification time
    pub modified: SystemTime,
    /// Size in bytes, captured before any removal
    pub size: u64,
}

impl FileCandidate {
    /// Build a candidate from a listing entry of the directory whose absolute
    /// form is `parent`.
    pub fn inspect(entry: &DirEntry, parent: &Path) -> Result<Self> {
        // DirEntry::metadata does not traverse symlinks.
        let metadata = entry.metadata()?;
        let file_name = entry.file_name();

        Ok(FileCandidate {
            name: file_name.to_string_lossy().into_owned(),
            absolute_path: parent.join(&file_name),
            is_dir: metadata.is_dir(),
            modified: metadata.modified()?,
            size: if metadata.is_dir() { 0 } else { metadata.len() },
        })
    }
}
