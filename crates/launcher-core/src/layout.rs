use std::env;
use std::path::PathBuf;

use crate::error::{Context, ErrorKind, Fallible};
use dunce::canonicalize;
use log::debug;
use once_cell::sync::OnceCell;

/// File name of the server, expected next to the launcher executable
pub const SERVER_SCRIPT: &str = "server.py";

static LAUNCHER_INSTALL: OnceCell<LauncherInstall> = OnceCell::new();

/// The directory the launcher was installed into, along with the files it expects there
pub struct LauncherInstall {
    root: PathBuf,
}

impl LauncherInstall {
    pub fn new(root: PathBuf) -> Self {
        LauncherInstall { root }
    }

    pub fn server_script(&self) -> PathBuf {
        self.root.join(SERVER_SCRIPT)
    }
}

pub fn launcher_install<'a>() -> Fallible<&'a LauncherInstall> {
    LAUNCHER_INSTALL.get_or_try_init(|| {
        let install_dir = default_install_dir()?;
        debug!("Launcher directory: {}", install_dir.display());
        Ok(LauncherInstall::new(install_dir))
    })
}

/// Determine the install directory from the currently running executable
///
/// The server is shipped in the same directory as the launcher, so the running executable tells
/// us where to look. We canonicalize the path we get from current_exe so that a symlink to the
/// launcher still finds the server next to the actual binary.
fn default_install_dir() -> Fallible<PathBuf> {
    env::current_exe()
        .and_then(canonicalize)
        .map(|mut path| {
            path.pop(); // Remove the executable name from the path
            path
        })
        .with_context(|| ErrorKind::NoInstallDir)
}
