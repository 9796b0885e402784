use std::fs::{self, File, OpenOptions, TryLockError};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::CheckError;
use crate::fingerprint::Fingerprint;

/// `None` only when the file does not exist. An empty file is a prior state.
pub fn read_fingerprint(path: &Path) -> Result<Option<String>, CheckError> {
    match fs::read_to_string(path) {
        Ok(content) => {
            let previous = content.trim().to_string();
            debug!(action = "read", component = "state_file", file_path = ?path, previous = %previous, "Read previous fingerprint");
            Ok(Some(previous))
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!(action = "read", component = "state_file", file_path = ?path, "No previous fingerprint");
            Ok(None)
        }
        Err(e) => Err(CheckError::state(path, e)),
    }
}

/// Replaces the file contents with the bare hex digest.
pub fn write_fingerprint(path: &Path, fingerprint: &Fingerprint) -> Result<(), CheckError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| CheckError::state(parent, e))?;
    }
    fs::write(path, fingerprint.as_str()).map_err(|e| CheckError::state(path, e))?;
    info!(action = "write", component = "state_file", file_path = ?path, fingerprint = %fingerprint, "Stored fingerprint");
    Ok(())
}

/// Exclusive guard over a state file: an advisory lock on a `<state>.lock`
/// sibling. The OS drops the lock when the holding process exits, so a run
/// that was killed never blocks the next one. The file itself stays behind.
#[derive(Debug)]
pub struct StateLock {
    path: PathBuf,
    _file: File,
}

impl StateLock {
    pub fn acquire(state_path: &Path) -> Result<Self, CheckError> {
        let path = lock_path(state_path);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| CheckError::state(parent, e))?;
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(|e| CheckError::state(&path, e))?;

        match file.try_lock() {
            Ok(()) => {
                debug!(action = "acquire", component = "state_lock", lock_path = ?path, "Acquired state lock");
                Ok(StateLock { path, _file: file })
            }
            Err(TryLockError::WouldBlock) => {
                warn!(action = "acquire", component = "state_lock", lock_path = ?path, "State lock held by another run");
                Err(CheckError::Locked(path))
            }
            Err(TryLockError::Error(e)) => Err(CheckError::state(path, e)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn lock_path(state_path: &Path) -> PathBuf {
    let mut name = state_path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".lock");
    state_path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_file_is_not_empty_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hash.txt");
        assert_eq!(read_fingerprint(&path).unwrap(), None);

        fs::write(&path, "").unwrap();
        assert_eq!(read_fingerprint(&path).unwrap(), Some(String::new()));
    }

    #[test]
    fn write_overwrites_with_bare_digest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("hash.txt");
        write_fingerprint(&path, &Fingerprint::of("A")).unwrap();
        write_fingerprint(&path, &Fingerprint::of("B")).unwrap();

        let stored = fs::read_to_string(&path).unwrap();
        assert_eq!(stored, Fingerprint::of("B").as_str());
    }

    #[test]
    fn lock_is_exclusive_until_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let state = dir.path().join("hash.txt");

        let lock = StateLock::acquire(&state).unwrap();
        assert_eq!(lock.path(), dir.path().join("hash.txt.lock"));
        assert!(matches!(
            StateLock::acquire(&state),
            Err(CheckError::Locked(_))
        ));

        drop(lock);
        assert!(StateLock::acquire(&state).is_ok());
    }

    #[test]
    fn leftover_lock_file_does_not_block() {
        let dir = tempfile::tempdir().unwrap();
        let state = dir.path().join("hash.txt");
        // What a killed run leaves behind: the file, but no live lock.
        fs::write(dir.path().join("hash.txt.lock"), "4242\n").unwrap();

        let lock = StateLock::acquire(&state).unwrap();
        assert_eq!(lock.path(), dir.path().join("hash.txt.lock"));
    }
}
