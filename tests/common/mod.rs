//! Shared integration-test harness: stub renderer scripts and helpers
//! for spawning the `plantpress` binary.
//!
//! The stubs stand in for the external renderer so the suite never
//! needs a PlantUML installation: they ignore the pipe-mode flags and
//! speak the same contract (stdin in, stdout out, stderr fatal).

#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Writes an executable `/bin/sh` stub script into `dir`.
pub fn stub_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("write stub script");
    let mut perms = fs::metadata(&path).expect("stat stub script").permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).expect("chmod stub script");
    path
}

/// A stub renderer that echoes stdin to stdout unchanged, ignoring its
/// arguments.
pub fn identity_stub(dir: &Path) -> PathBuf {
    stub_script(dir, "identity.sh", "exec cat")
}

/// A stub renderer that writes `message` to stderr and nothing to
/// stdout.
pub fn failing_stub(dir: &Path, message: &str) -> PathBuf {
    stub_script(dir, "failing.sh", &format!("printf '%s' '{message}' >&2"))
}

/// Runs the `plantpress` binary with the given arguments.
pub fn spawn_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_plantpress"))
        .args(args)
        .output()
        .expect("failed to spawn plantpress")
}

/// Like [`spawn_cli`] but with a working directory.
pub fn spawn_cli_in(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_plantpress"))
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to spawn plantpress")
}
