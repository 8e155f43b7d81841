//! Test environment for running the dirwatcher binary in isolation.
//!
//! Provides `TestEnv` - a temp directory acting as working directory, home
//! and watched directory, plus helpers to run the watcher for a while and
//! stop it the way a user would.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

/// Result of running the dirwatcher binary
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

/// Isolated environment with a watched directory under a temp root.
pub struct TestEnv {
    pub root: TempDir,
    bin: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let root = TempDir::new().expect("failed to create temp dir");
        fs::create_dir_all(root.path().join("watched")).expect("failed to create watched dir");
        Self {
            root,
            bin: PathBuf::from(env!("CARGO_BIN_EXE_dirwatcher")),
        }
    }

    /// The directory the watcher is pointed at
    pub fn watched(&self) -> PathBuf {
        self.root.path().join("watched")
    }

    pub fn write(&self, name: &str, content: &str) {
        fs::write(self.watched().join(name), content).expect("failed to write watched file");
    }

    pub fn append(&self, name: &str, content: &str) {
        use std::io::Write;
        let mut file = fs::OpenOptions::new()
            .append(true)
            .open(self.watched().join(name))
            .expect("failed to open watched file");
        file.write_all(content.as_bytes())
            .expect("failed to append to watched file");
    }

    pub fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(&self.bin);
        cmd.args(args)
            .current_dir(self.root.path())
            .env("HOME", self.root.path())
            .env("XDG_CONFIG_HOME", self.root.path().join(".config"))
            .env_remove("RUST_LOG")
            .env_remove("DIRWATCHER_INTERVAL")
            .env_remove("DIRWATCHER_EXTENSION")
            .env_remove("DIRWATCHER_BACKOFF")
            .env_remove("DIRWATCHER_LOG_LEVEL")
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }

    /// Run to completion (for invocations that exit on their own)
    pub fn run(&self, args: &[&str]) -> TestResult {
        let output = self
            .command(args)
            .output()
            .expect("failed to run dirwatcher");
        TestResult {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }

    pub fn spawn(&self, args: &[&str]) -> Child {
        self.command(args).spawn().expect("failed to start dirwatcher")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// Send SIGTERM and collect the output of a graceful exit.
#[cfg(unix)]
pub fn terminate(child: Child) -> TestResult {
    let status = Command::new("kill")
        .args(["-TERM", &child.id().to_string()])
        .status()
        .expect("failed to run kill");
    assert!(status.success(), "kill -TERM failed");

    let output = child.wait_with_output().expect("failed to collect output");
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}

/// Give the watcher time for a few polling cycles
pub fn settle() {
    thread::sleep(Duration::from_millis(600));
}

pub fn path_str(path: &Path) -> String {
    path.display().to_string()
}
