//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create an ssm command wired to the fake tools.
    ///
    /// Returns a Command configured with:
    /// - `PATH` holding only the fake tools and the system directories
    /// - HOME and XDG_CONFIG_HOME set to the temporary home directory
    /// - TMPDIR set to a private directory
    /// - Current directory set to the test directory
    /// - Colors and inherited ssm variables cleared
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("ssm").expect("failed to find ssm binary");
        let path = format!("{}:/usr/bin:/bin", self.bin.path().display());
        cmd.env("PATH", path);
        cmd.env("HOME", self.home.path());
        cmd.env("XDG_CONFIG_HOME", self.home.path().join(".config"));
        cmd.env("FAKE_STATE", self.state.path());
        cmd.env("TMPDIR", self.tmp.path());
        cmd.env("NO_COLOR", "1");
        cmd.env_remove("SSM_DIR");
        cmd.env_remove("SSM_LOG");
        cmd.env_remove("SSM_CONTROLLER_NAMESPACE");
        cmd.env_remove("FAKE_KUBECTL_FAIL");
        cmd.env_remove("FAKE_KUBESEAL_FAIL");
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Run ssm with `args`, feeding `stdin` as the operator's answers.
    pub fn run(&self, args: &[&str], stdin: &str) -> Output {
        self.cmd()
            .args(args)
            .write_stdin(stdin)
            .output()
            .expect("failed to run ssm")
    }

    /// Shortcut for `ssm list`.
    pub fn list(&self) -> Output {
        self.run(&["list"], "")
    }

    /// Shortcut for `ssm list --json`.
    pub fn list_json(&self) -> Output {
        self.run(&["list", "--json"], "")
    }

    /// Shortcut for `ssm apply <file>`.
    pub fn apply(&self, file: &str) -> Output {
        self.run(&["apply", file], "")
    }
}
