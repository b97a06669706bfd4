//! Destinations for exported artifacts.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ExportError;

/// Receives finished artifacts under a suggested file name.
pub trait DownloadSink {
    fn deliver(&mut self, filename: &str, bytes: &[u8]) -> Result<PathBuf, ExportError>;
}

fn io_error(path: &Path, source: std::io::Error) -> ExportError {
    ExportError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Partially written download. Removed on drop unless committed.
struct PendingFile {
    path: PathBuf,
    committed: bool,
}

impl PendingFile {
    fn create(path: PathBuf, bytes: &[u8]) -> Result<Self, ExportError> {
        let pending = Self {
            path,
            committed: false,
        };
        fs::write(&pending.path, bytes).map_err(|e| io_error(&pending.path, e))?;
        Ok(pending)
    }

    fn commit(mut self, target: &Path) -> Result<(), ExportError> {
        fs::rename(&self.path, target).map_err(|e| io_error(target, e))?;
        self.committed = true;
        Ok(())
    }
}

impl Drop for PendingFile {
    fn drop(&mut self) {
        if !self.committed {
            if let Err(e) = fs::remove_file(&self.path) {
                if e.kind() != std::io::ErrorKind::NotFound {
                    log::warn!("Could not remove {}: {}", self.path.display(), e);
                }
            }
        }
    }
}

/// Saves artifacts into a directory the way a browser download would,
/// appending ` (n)` when the name is taken.
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, ExportError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| io_error(&dir, e))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn free_name(&self, filename: &str) -> PathBuf {
        let candidate = self.dir.join(filename);
        if !candidate.exists() {
            return candidate;
        }
        let path = Path::new(filename);
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or(filename);
        let ext = path.extension().and_then(|e| e.to_str());
        (1..)
            .map(|n| {
                let name = match ext {
                    Some(ext) => format!("{} ({}).{}", stem, n, ext),
                    None => format!("{} ({})", stem, n),
                };
                self.dir.join(name)
            })
            .find(|p| !p.exists())
            .unwrap_or(candidate)
    }
}

impl DownloadSink for DirectorySink {
    fn deliver(&mut self, filename: &str, bytes: &[u8]) -> Result<PathBuf, ExportError> {
        let target = self.free_name(filename);
        let temp = self.dir.join(format!(".{}.part", filename));
        let pending = PendingFile::create(temp, bytes)?;
        pending.commit(&target)?;
        log::info!("Saved {} ({} bytes)", target.display(), bytes.len());
        Ok(target)
    }
}

/// Keeps artifacts in memory, for embedding and tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub files: Vec<(String, Vec<u8>)>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&(String, Vec<u8>)> {
        self.files.last()
    }
}

impl DownloadSink for MemorySink {
    fn deliver(&mut self, filename: &str, bytes: &[u8]) -> Result<PathBuf, ExportError> {
        self.files.push((filename.to_string(), bytes.to_vec()));
        Ok(PathBuf::from(filename))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn saves_and_leaves_no_temp_files() {
        let dir = TempDir::new().unwrap();
        let mut sink = DirectorySink::new(dir.path()).unwrap();
        let path = sink.deliver("qrcode-2024-01-01.png", b"abc").unwrap();
        assert_eq!(path, dir.path().join("qrcode-2024-01-01.png"));
        assert_eq!(fs::read(&path).unwrap(), b"abc");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn name_collision_gets_a_counter() {
        let dir = TempDir::new().unwrap();
        let mut sink = DirectorySink::new(dir.path()).unwrap();
        sink.deliver("qrcode-2024-01-01.svg", b"1").unwrap();
        let second = sink.deliver("qrcode-2024-01-01.svg", b"2").unwrap();
        assert_eq!(second, dir.path().join("qrcode-2024-01-01 (1).svg"));
    }

    #[test]
    fn failed_commit_removes_temp_file() {
        let dir = TempDir::new().unwrap();
        let temp = dir.path().join("x.part");
        let pending = PendingFile::create(temp.clone(), b"data").unwrap();
        let missing_dir = dir.path().join("missing").join("x.png");
        assert!(pending.commit(&missing_dir).is_err());
        assert!(!temp.exists());
    }

    #[test]
    fn memory_sink_records_files() {
        let mut sink = MemorySink::new();
        sink.deliver("a.svg", b"<svg/>").unwrap();
        assert_eq!(sink.last().unwrap().0, "a.svg");
    }
}
