use crate::error::ShellError;
use std::collections::TryReserveError;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Ordered list of directories consulted when resolving external commands.
///
/// Earlier entries win. Duplicates and nonexistent directories are allowed; the
/// latter simply never match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPath {
    dirs: Vec<PathBuf>,
}

impl SearchPath {
    pub fn new<P: AsRef<Path>>(dirs: &[P]) -> Self {
        Self {
            dirs: dirs.iter().map(|d| d.as_ref().to_path_buf()).collect(),
        }
    }

    /// Current entries, in resolution order.
    pub fn paths(&self) -> &[PathBuf] {
        &self.dirs
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }

    /// Replace every entry with `dirs`, in the given order.
    ///
    /// The new list is built completely before it is swapped in, so on an
    /// allocation failure the previous entries are still in place.
    pub fn set_paths<P: AsRef<Path>>(&mut self, dirs: &[P]) -> Result<(), ShellError> {
        let fresh = copy_dirs(dirs).map_err(|source| ShellError::PathUpdate {
            count: dirs.len(),
            source,
        })?;
        self.dirs = fresh;
        Ok(())
    }
}

fn copy_dirs<P: AsRef<Path>>(dirs: &[P]) -> Result<Vec<PathBuf>, TryReserveError> {
    let mut fresh = Vec::new();
    fresh.try_reserve_exact(dirs.len())?;
    for dir in dirs {
        let dir = dir.as_ref().as_os_str();
        let mut owned = OsString::new();
        owned.try_reserve_exact(dir.len())?;
        owned.push(dir);
        fresh.push(PathBuf::from(owned));
    }
    Ok(fresh)
}

/// State the interpreter threads through every command.
///
/// - `search_path`: directories used to resolve external commands.
/// - `should_exit`: set by `exit`; the loop stops before reading another line.
#[derive(Debug, Clone)]
pub struct Environment {
    pub search_path: SearchPath,
    pub should_exit: bool,
}

impl Environment {
    pub fn new(search_path: SearchPath) -> Self {
        Self {
            search_path,
            should_exit: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::dir_names;

    #[test]
    fn set_paths_replaces_everything_in_order() {
        let mut sp = SearchPath::new(&["/bin"]);
        sp.set_paths(&["/usr/local/bin", "/usr/bin", "/usr/local/bin"])
            .unwrap();
        assert_eq!(
            dir_names(&sp),
            ["/usr/local/bin", "/usr/bin", "/usr/local/bin"]
        );
    }

    #[test]
    fn set_paths_with_nothing_empties_the_list() {
        let mut sp = SearchPath::new(&["/bin", "/usr/bin"]);
        let none: [&str; 0] = [];
        sp.set_paths(&none).unwrap();
        assert!(sp.is_empty());
    }

    #[test]
    fn set_paths_does_not_validate_entries() {
        let mut sp = SearchPath::default();
        sp.set_paths(&["/definitely/not/here", ""]).unwrap();
        assert_eq!(sp.paths().len(), 2);
    }

    #[test]
    fn environment_starts_running() {
        let env = Environment::new(SearchPath::new(&["/bin"]));
        assert!(!env.should_exit);
        assert_eq!(dir_names(&env.search_path), ["/bin"]);
    }

    #[test]
    #[cfg(unix)]
    fn set_paths_keeps_non_utf8_bytes() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;
        let odd = Path::new(OsStr::from_bytes(b"/opt/bin\xff"));
        let mut sp = SearchPath::default();
        sp.set_paths(&[odd]).unwrap();

        assert_eq!(sp.paths()[0].as_os_str().as_bytes(), b"/opt/bin\xff");
    }
}
