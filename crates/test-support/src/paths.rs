//! Scratch directories for acceptance tests, one per test thread under `target/acceptance_test`.
use std::cell::Cell;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

const ACCEPTANCE_TEST_DIR: &str = "acceptance_test";

static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

thread_local! {
    static THREAD_ID: usize = NEXT_ID.fetch_add(1, Ordering::SeqCst);
    static CLEANED: Cell<bool> = Cell::new(false);
}

/// The `target` directory of the build running the tests
///
/// Test binaries live in `target/<profile>/deps`, or `target/<triple>/<profile>/deps` when
/// cross-compiling.
fn target_dir() -> PathBuf {
    let exe = ok_or_panic! { env::current_exe() };
    exe.ancestors()
        .find(|dir| dir.file_name().and_then(|name| name.to_str()) == Some("target"))
        .map(Path::to_path_buf)
        .unwrap_or_else(|| panic!("{} is not inside a target directory", exe.display()))
}

/// Scratch directory owned by the current test thread
///
/// Emptied the first time a thread asks for it, so leftovers from an earlier run never leak
/// into a test.
pub fn root() -> PathBuf {
    let root = target_dir()
        .join(ACCEPTANCE_TEST_DIR)
        .join(THREAD_ID.with(|id| format!("t{}", id)));

    if !CLEANED.with(|cleaned| cleaned.replace(true)) {
        root.rm_rf();
        root.mkdir_p();
    }

    root
}

pub trait PathExt {
    /// Remove a directory and everything in it, if it exists
    fn rm_rf(&self);
    /// Create a directory along with any missing parents
    fn mkdir_p(&self);
}

impl PathExt for Path {
    fn rm_rf(&self) {
        if self.exists() {
            fs::remove_dir_all(self)
                .unwrap_or_else(|e| panic!("failed to remove {}: {}", self.display(), e));
        }
    }

    fn mkdir_p(&self) {
        fs::create_dir_all(self)
            .unwrap_or_else(|e| panic!("failed to create {}: {}", self.display(), e));
    }
}
