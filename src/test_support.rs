use crate::env::SearchPath;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, OnceLock};

/// Serializes tests that change the working directory or spawn children.
///
/// Spawning while another test still holds a freshly written script open for
/// writing makes exec fail with ETXTBSY, so both kinds share one lock.
pub(crate) fn lock_process_state() -> MutexGuard<'static, ()> {
    static MUTEX: OnceLock<Mutex<()>> = OnceLock::new();
    MUTEX
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Write an executable `#!/bin/sh` script named `name` into `dir`.
pub(crate) fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("write script");
    make_executable(&path);
    path
}

pub(crate) fn make_executable(path: &Path) {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o755)).expect("chmod");
    }
    #[cfg(not(unix))]
    let _ = path;
}

/// Search path entries as text, for comparing against string literals.
pub(crate) fn dir_names(search_path: &SearchPath) -> Vec<String> {
    search_path
        .paths()
        .iter()
        .map(|d| d.to_string_lossy().into_owned())
        .collect()
}
