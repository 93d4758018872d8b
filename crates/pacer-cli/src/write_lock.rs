//! Cross-process write lock for one database file.
//!
//! The lock is a `<db>.lock` file holding the owner's pid, created with
//! `create_new` and removed when the guard drops. A lock whose pid is no
//! longer running is treated as stale and reclaimed.

use std::fs::OpenOptions;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

const LOCK_WAIT_TIMEOUT: Duration = Duration::from_secs(120);
const LOCK_RETRY_DELAY: Duration = Duration::from_millis(200);

pub struct WriteLockGuard {
    path: PathBuf,
}

impl Drop for WriteLockGuard {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

#[derive(Debug)]
enum LockState {
    HeldBy(u32),
    Stale,
    Unreadable,
}

/// Path of the lock file guarding `db_path`.
#[must_use]
pub fn lock_path_for(db_path: &Path) -> PathBuf {
    let mut name = db_path.as_os_str().to_owned();
    name.push(".lock");
    PathBuf::from(name)
}

/// Wait until this process owns the write lock for `db_path`.
pub async fn acquire_for_db(db_path: &Path) -> anyhow::Result<WriteLockGuard> {
    let lock_path = lock_path_for(db_path);
    let started = Instant::now();

    loop {
        let waiting_on = match try_acquire(&lock_path) {
            Ok(guard) => return Ok(guard),
            Err(LockState::Stale) => {
                tracing::debug!(path = %lock_path.display(), "reclaiming stale write lock");
                let _ = std::fs::remove_file(&lock_path);
                continue;
            }
            Err(state) => state,
        };

        if started.elapsed() >= LOCK_WAIT_TIMEOUT {
            match waiting_on {
                LockState::HeldBy(pid) => anyhow::bail!(
                    "another pacer process (pid {pid}) is writing to {}; try again after it finishes",
                    db_path.display()
                ),
                _ => anyhow::bail!(
                    "could not acquire write lock at {}; remove it if no pacer process is running",
                    lock_path.display()
                ),
            }
        }
        tokio::time::sleep(LOCK_RETRY_DELAY).await;
    }
}

fn try_acquire(lock_path: &Path) -> Result<WriteLockGuard, LockState> {
    if let Some(parent) = lock_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        let _ = std::fs::create_dir_all(parent);
    }

    match OpenOptions::new().create_new(true).write(true).open(lock_path) {
        Ok(mut file) => {
            let _ = writeln!(file, "{}", std::process::id());
            Ok(WriteLockGuard {
                path: lock_path.to_path_buf(),
            })
        }
        Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => {
            let mut contents = String::new();
            OpenOptions::new()
                .read(true)
                .open(lock_path)
                .and_then(|mut file| file.read_to_string(&mut contents))
                .map_err(|_| LockState::Unreadable)?;

            match contents.trim().parse::<u32>() {
                Ok(pid) if is_process_running(pid) => Err(LockState::HeldBy(pid)),
                Ok(_) => Err(LockState::Stale),
                Err(_) => Err(LockState::Unreadable),
            }
        }
        Err(_) => Err(LockState::Unreadable),
    }
}

fn is_process_running(pid: u32) -> bool {
    std::process::Command::new("kill")
        .arg("-0")
        .arg(pid.to_string())
        .status()
        .is_ok_and(|status| status.success())
}
