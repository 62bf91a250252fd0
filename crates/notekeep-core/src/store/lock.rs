// crates/notekeep-core/src/store/lock.rs - Advisory lock file
//
// The lock is a sibling file created with exclusive-create semantics. Whoever
// creates it owns the database until the guard is dropped. The owning pid is
// written into the file; a lock whose owner is no longer running (killed
// before its guard dropped) is taken over instead of blocking every writer.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use super::{StoreError, StoreResult};

const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Held lock; removing the file on drop releases it on every exit path
#[derive(Debug)]
pub(crate) struct LockFile {
    path: PathBuf,
}

impl LockFile {
    /// Create the lock file, polling until `timeout` if someone else holds it
    pub(crate) fn acquire(path: &Path, timeout: Duration) -> StoreResult<Self> {
        let deadline = Instant::now() + timeout;
        let mut reported = false;

        loop {
            match OpenOptions::new().write(true).create_new(true).open(path) {
                Ok(mut file) => {
                    if let Err(source) = writeln!(file, "{}", std::process::id()) {
                        let _ = fs::remove_file(path);
                        return Err(StoreError::Io {
                            path: path.to_path_buf(),
                            source,
                        });
                    }
                    debug!(lock = %path.display(), "acquired database lock");
                    return Ok(Self {
                        path: path.to_path_buf(),
                    });
                }
                Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
                    if let Some(pid) = stale_owner(path) {
                        warn!(lock = %path.display(), pid, "removing stale lock left by a dead process");
                        remove_if_owned_by(path, pid)?;
                        continue;
                    }
                    if Instant::now() >= deadline {
                        return Err(StoreError::Locked {
                            path: path.to_path_buf(),
                        });
                    }
                    if !reported {
                        warn!(lock = %path.display(), "database is locked, waiting");
                        reported = true;
                    }
                    thread::sleep(POLL_INTERVAL);
                }
                Err(source) => {
                    return Err(StoreError::Io {
                        path: path.to_path_buf(),
                        source,
                    });
                }
            }
        }
    }
}

/// Pid recorded in the lock file, if that process is gone
fn stale_owner(path: &Path) -> Option<u32> {
    let pid = read_owner(path)?;
    (!pid_is_alive(pid)).then_some(pid)
}

fn read_owner(path: &Path) -> Option<u32> {
    fs::read_to_string(path).ok()?.trim().parse().ok()
}

/// Delete the lock only while it still names `pid`, so a lock freshly taken
/// over by another process is left alone.
fn remove_if_owned_by(path: &Path, pid: u32) -> StoreResult<()> {
    if read_owner(path) != Some(pid) {
        return Ok(());
    }
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(StoreError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Check if a pid is alive using `kill(pid, 0)`
#[cfg(unix)]
fn pid_is_alive(pid: u32) -> bool {
    use nix::errno::Errno;
    use nix::sys::signal::kill;
    use nix::unistd::Pid;

    let Ok(raw) = i32::try_from(pid) else {
        return false;
    };
    matches!(kill(Pid::from_raw(raw), None), Ok(()) | Err(Errno::EPERM))
}

/// Without a liveness check every recorded owner is assumed alive
#[cfg(not(unix))]
fn pid_is_alive(_pid: u32) -> bool {
    true
}

impl Drop for LockFile {
    fn drop(&mut self) {
        match fs::remove_file(&self.path) {
            Ok(()) => debug!(lock = %self.path.display(), "released database lock"),
            Err(err) => warn!(lock = %self.path.display(), error = %err, "failed to remove lock file"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_lock_is_exclusive_and_released_on_drop() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("db.json.lock");

        let held = LockFile::acquire(&path, Duration::ZERO).unwrap();
        assert!(path.exists());

        let second = LockFile::acquire(&path, Duration::from_millis(60));
        assert!(matches!(second, Err(StoreError::Locked { .. })));

        drop(held);
        assert!(!path.exists());
        assert!(LockFile::acquire(&path, Duration::ZERO).is_ok());
    }

    #[test]
    fn test_lock_records_owner_pid() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("db.json.lock");

        let _held = LockFile::acquire(&path, Duration::ZERO).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.trim(), std::process::id().to_string());
    }

    #[cfg(unix)]
    fn dead_pid() -> u32 {
        let mut child = std::process::Command::new("true").spawn().unwrap();
        let pid = child.id();
        child.wait().unwrap();
        pid
    }

    #[cfg(unix)]
    #[test]
    fn test_lock_left_by_dead_process_is_taken_over() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("db.json.lock");
        fs::write(&path, format!("{}\n", dead_pid())).unwrap();

        let held = LockFile::acquire(&path, Duration::ZERO).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.trim(), std::process::id().to_string());

        drop(held);
        assert!(!path.exists());
    }

    #[test]
    fn test_lock_of_live_process_is_respected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("db.json.lock");
        fs::write(&path, format!("{}\n", std::process::id())).unwrap();

        let result = LockFile::acquire(&path, Duration::from_millis(30));
        assert!(matches!(result, Err(StoreError::Locked { .. })));
        assert!(path.exists());
    }

    #[test]
    fn test_lock_without_readable_owner_is_respected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("db.json.lock");
        fs::write(&path, "").unwrap();

        let result = LockFile::acquire(&path, Duration::ZERO);
        assert!(matches!(result, Err(StoreError::Locked { .. })));
    }

    #[test]
    fn test_lock_in_missing_directory_is_io_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing").join("db.json.lock");

        let result = LockFile::acquire(&path, Duration::ZERO);
        assert!(matches!(result, Err(StoreError::Io { .. })));
    }
}
