//! Shared fixtures for CLI tests.

use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use tempfile::TempDir;

pub(super) const CALL_PATTERN: &str = r#"{
    "NodeType": "MatchRule",
    "Rules": [{
        "NodeType": "MatchRule",
        "Name": "call",
        "Exact": true,
        "Rules": [{
            "NodeType": "CallExpr",
            "Fun": {
                "NodeType": "MatchRule",
                "Name": "fun",
                "Exact": true,
                "Rules": [{"NodeType": "Ident", "Name": "print"}]
            },
            "Args": {
                "NodeType": "MatchRule",
                "Name": "constant",
                "Rules": [{"NodeType": "BasicLit", "Kind": "STRING"}]
            }
        }]
    }]
}"#;

pub(super) const PRINT_TREE: &str = r#"{
    "NodeType": "CallExpr",
    "Fun": {"NodeType": "Ident", "Name": "print"},
    "Args": [{"NodeType": "BasicLit", "Kind": "STRING", "Value": "hi"}]
}"#;

/// Temporary files plus captured output of one in-process run.
pub(super) struct Workspace {
    dir: TempDir,
}

/// Captured result of [`Workspace::run`].
pub(super) struct RunOutput {
    pub(super) code: ExitCode,
    pub(super) stdout: String,
    pub(super) stderr: String,
}

impl Workspace {
    pub(super) fn new() -> Self {
        Self {
            dir: TempDir::new().expect("temporary directory"),
        }
    }

    pub(super) fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, contents).expect("write fixture");
        path
    }

    pub(super) fn run(&self, args: &[OsString]) -> RunOutput {
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let mut argv = vec![OsString::from("asty")];
        argv.extend(args.iter().cloned());
        let code = crate::run(argv, &mut stdout, &mut stderr);
        RunOutput {
            code,
            stdout: String::from_utf8(stdout).expect("utf-8 stdout"),
            stderr: String::from_utf8(stderr).expect("utf-8 stderr"),
        }
    }

    /// Runs `asty match` over the given pattern and tree text.
    pub(super) fn run_match(&self, pattern: &str, tree: &str, extra: &[&str]) -> RunOutput {
        let pattern_path = self.write("pattern.json", pattern);
        let tree_path = self.write("tree.json", tree);
        let mut args = vec![
            OsString::from("match"),
            OsString::from("--pattern"),
            pattern_path.into_os_string(),
            OsString::from("--input"),
            tree_path.into_os_string(),
        ];
        args.extend(extra.iter().map(OsString::from));
        self.run(&args)
    }
}
