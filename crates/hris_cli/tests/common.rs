#![allow(dead_code)]
use assert_cmd::{cargo_bin_cmd, Command};
use std::path::Path;
use tempfile::TempDir;

/// Isolated working area: database, logs and config home under one temp dir.
pub struct Sandbox {
    pub dir: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// `hris` preconfigured with this sandbox's db and log dir.
    pub fn hris(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("hris");
        cmd.env("XDG_CONFIG_HOME", self.path().join("config"))
            .env_remove("HRIS_BACKEND__DATABASE_PATH")
            .arg("--db")
            .arg(self.path().join("hris.sqlite3"))
            .arg("--log-dir")
            .arg(self.path().join("logs"));
        cmd
    }
}
