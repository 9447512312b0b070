use std::path::Path;

use assert_cmd::Command;
use tempfile::TempDir;

pub struct CliOutput {
    pub stdout: String,
    #[allow(dead_code)]
    pub stderr: String,
    pub success: bool,
}

/// Runs `carhire_cli` in script mode against an isolated home directory.
pub struct ScriptHarness {
    home: TempDir,
}

impl ScriptHarness {
    pub fn new() -> Self {
        Self {
            home: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn home(&self) -> &Path {
        self.home.path()
    }

    #[allow(dead_code)]
    pub fn write_config(&self, json: &str) {
        std::fs::write(self.home().join("config.json"), json).expect("write config");
    }

    pub fn run_script(&self, script: &str) -> CliOutput {
        let mut cmd = Command::cargo_bin("carhire_cli").expect("binary exists");
        cmd.env("CARHIRE_HOME", self.home())
            .env("CARHIRE_CLI_SCRIPT", "1")
            .env("NO_COLOR", "1")
            .write_stdin(script.to_string());
        let output = cmd.output().expect("run script CLI");
        CliOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
        }
    }
}

/// A complete, valid trip submission for a far-future date.
#[allow(dead_code)]
pub fn trip_line(hours: &str) -> String {
    format!(
        "trip fullName='Anaya Sharma' phone='+91 98200-12345' email=anaya@example.in \
         startLocation='Marine Drive' endLocation='Bandra Kurla Complex' \
         eventDate=2099-02-14 pickupTime=19:30 hours={hours}"
    )
}
