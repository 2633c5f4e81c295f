use std::env;
use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use test_support::{self, ok_or_panic, paths, paths::PathExt, process::ProcessBuilder};

/// Interpreter stand-in: runs the script it is given with the system shell
const STUB_INTERPRETER: &str = r#"#!/bin/sh
exec /bin/sh "$@"
"#;

// environment variables
pub struct EnvVar {
    name: String,
    value: String,
}

impl EnvVar {
    pub fn new(name: &str, value: &str) -> Self {
        EnvVar {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}

// used to construct the sandboxed server script and interpreters
#[derive(PartialEq, Clone)]
pub struct FileBuilder {
    path: PathBuf,
    contents: String,
    executable: bool,
}

impl FileBuilder {
    pub fn new(path: PathBuf, contents: &str) -> FileBuilder {
        FileBuilder {
            path,
            contents: contents.to_string(),
            executable: false,
        }
    }

    pub fn executable(mut self) -> Self {
        self.executable = true;
        self
    }

    pub fn build(&self) {
        self.dirname().mkdir_p();

        let mut file = File::create(&self.path)
            .unwrap_or_else(|e| panic!("could not create file {}: {}", self.path.display(), e));

        ok_or_panic! { file.write_all(self.contents.as_bytes()) };

        if self.executable {
            ok_or_panic! { fs::set_permissions(&self.path, fs::Permissions::from_mode(0o755)) };
        }
    }

    fn dirname(&self) -> &Path {
        self.path.parent().unwrap()
    }
}

#[must_use]
pub struct SandboxBuilder {
    root: Sandbox,
    files: Vec<FileBuilder>,
}

impl SandboxBuilder {
    /// Root of the sandbox, ex: `/path/to/cargo/target/acceptance_test/t0/sandbox`
    pub fn root(&self) -> PathBuf {
        self.root.root()
    }

    pub fn new(root: PathBuf) -> SandboxBuilder {
        SandboxBuilder {
            root: Sandbox {
                root,
                env_vars: vec![],
            },
            files: vec![],
        }
    }

    /// Set the server script installed next to the launcher (chainable)
    pub fn server(mut self, contents: &str) -> Self {
        let script = server_script(self.root());
        self.files.push(FileBuilder::new(script, contents));
        self
    }

    /// Put a stub interpreter with the given name on the sandbox PATH (chainable)
    pub fn interpreter(mut self, name: &str) -> Self {
        let stub = bin_dir(self.root()).join(name);
        self.files
            .push(FileBuilder::new(stub, STUB_INTERPRETER).executable());
        self
    }

    /// Set an environment variable for the sandbox (chainable)
    pub fn env(mut self, name: &str, value: &str) -> Self {
        self.root.env_vars.push(EnvVar::new(name, value));
        self
    }

    /// Create the sandbox
    pub fn build(self) -> Sandbox {
        // First, clean the directory if it already exists
        self.rm_root();

        // Create the empty directories; the PATH must exist even with no interpreters in it
        install_dir(self.root()).mkdir_p();
        bin_dir(self.root()).mkdir_p();

        install_launcher(&launcher_exe(), &self.root.launcher());

        // write files
        for file_builder in self.files.iter() {
            file_builder.build();
        }

        let SandboxBuilder { root, .. } = self;
        root
    }

    fn rm_root(&self) {
        self.root.root().rm_rf()
    }
}

// files and dirs in the sandbox

fn install_dir(root: PathBuf) -> PathBuf {
    root.join("install")
}
fn bin_dir(root: PathBuf) -> PathBuf {
    root.join("bin")
}
fn server_script(root: PathBuf) -> PathBuf {
    install_dir(root).join("server.py")
}

pub struct Sandbox {
    root: PathBuf,
    env_vars: Vec<EnvVar>,
}

impl Sandbox {
    /// Root of the sandbox, ex: `/path/to/cargo/target/acceptance_test/t0/sandbox`
    pub fn root(&self) -> PathBuf {
        self.root.clone()
    }

    /// The launcher as installed in the sandbox, next to the server script
    pub fn launcher(&self) -> PathBuf {
        install_dir(self.root()).join(format!("launcher{}", env::consts::EXE_SUFFIX))
    }

    pub fn server_script(&self) -> PathBuf {
        server_script(self.root())
    }

    /// Create a `ProcessBuilder` to run a program in the sandbox.
    /// Example:
    ///         assert_that!(
    ///             s.process(s.launcher()),
    ///             execs().with_stdout("hello"),
    ///         );
    pub fn process<T: AsRef<OsStr>>(&self, program: T) -> ProcessBuilder {
        let mut p = test_support::process::process(program);
        p.cwd(self.root())
            // only the sandbox interpreters are visible, so server stubs stick to shell
            // builtins or absolute paths
            .env("PATH", bin_dir(self.root()))
            .env_remove("LAUNCHER_LOGLEVEL")
            .env_remove("LAUNCHER_DEV");

        // overrides for env vars
        for env_var in &self.env_vars {
            p.env(&env_var.name, &env_var.value);
        }

        p
    }

    /// Create a `ProcessBuilder` to run the launcher, with arguments separated by spaces.
    pub fn launch(&self, args: &str) -> ProcessBuilder {
        let mut p = self.process(self.launcher());
        split_and_add_args(&mut p, args);
        p
    }
}

// Generates a sandboxed environment
pub fn sandbox() -> SandboxBuilder {
    SandboxBuilder::new(paths::root().join("sandbox"))
}

fn launcher_exe() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_launcher"))
}

// Hard links keep the executable from ever being open for writing while tests spawn processes;
// copying is the fallback when the sandbox is on another filesystem.
fn install_launcher(from: &Path, to: &Path) {
    if fs::hard_link(from, to).is_err() {
        ok_or_panic! { fs::copy(from, to) };
    }
}

fn split_and_add_args(p: &mut ProcessBuilder, s: &str) {
    for arg in s.split_whitespace() {
        if arg.contains('"') || arg.contains('\'') {
            panic!("shell-style argument parsing is not supported")
        }
        p.arg(arg);
    }
}
