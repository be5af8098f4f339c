//! Behavioural tests for the defaults, file, environment and flag layers.
//!
//! Each scenario runs the `asty` binary in its own process, so environment
//! overrides never leak between tests.

use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tempfile::TempDir;

const PATTERN: &str = r#"{"NodeType": "MatchRule", "Name": "id", "Rules": [{"NodeType": "Ident"}]}"#;
const TREE: &str = r#"{"NodeType": "Ident", "Name": "x"}"#;

struct Harness {
    temp_dir: TempDir,
    config_path: RefCell<Option<PathBuf>>,
    env: RefCell<Vec<(String, String)>>,
    flags: RefCell<Vec<String>>,
    stdout: RefCell<Option<String>>,
}

impl Harness {
    fn new() -> Self {
        let temp_dir = match TempDir::new() {
            Ok(dir) => dir,
            Err(error) => panic!("failed to create temporary directory: {error}"),
        };
        Self {
            temp_dir,
            config_path: RefCell::new(None),
            env: RefCell::new(Vec::new()),
            flags: RefCell::new(Vec::new()),
            stdout: RefCell::new(None),
        }
    }

    fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        if let Err(error) = fs::write(&path, contents) {
            panic!("failed to write {name}: {error}");
        }
        path
    }

    fn run(&self) {
        let pattern = self.write("pattern.json", PATTERN);
        let tree = self.write("tree.json", TREE);

        let mut command = cargo_bin_cmd!("asty");
        command
            .env_remove("ASTY_OUTPUT")
            .env_remove("ASTY_CONFIG_PATH")
            .env("ASTY_LOG_FILTER", "off")
            .envs(self.env.borrow().iter().map(|(key, value)| (key, value)));
        if let Some(path) = self.config_path.borrow().as_ref() {
            command.arg("--config-path").arg(path);
        }
        command
            .arg("match")
            .arg("--pattern")
            .arg(&pattern)
            .arg("--input")
            .arg(&tree)
            .args(self.flags.borrow().iter());

        let output = command.assert().success().get_output().stdout.clone();
        match String::from_utf8(output) {
            Ok(text) => *self.stdout.borrow_mut() = Some(text),
            Err(error) => panic!("stdout is not UTF-8: {error}"),
        }
    }
}

#[fixture]
fn harness() -> Harness {
    Harness::new()
}

#[given("a configuration file setting the output to \"{format}\"")]
fn given_configuration_file(harness: &Harness, format: String) {
    let path = harness.write("asty.toml", &format!("output = \"{format}\"\n"));
    *harness.config_path.borrow_mut() = Some(path);
}

#[given("the environment sets the output to \"{format}\"")]
fn given_environment(harness: &Harness, format: String) {
    harness
        .env
        .borrow_mut()
        .push((String::from("ASTY_OUTPUT"), format));
}

#[given("the flag sets the output to \"{format}\"")]
fn given_flag(harness: &Harness, format: String) {
    harness
        .flags
        .borrow_mut()
        .extend([String::from("--output"), format]);
}

#[when("asty match runs")]
fn when_match_runs(harness: &Harness) {
    harness.run();
}

#[then("the output is \"{format}\"")]
fn then_output_is(harness: &Harness, format: String) {
    let stdout = harness.stdout.borrow();
    let Some(text) = stdout.as_ref() else {
        panic!("asty match has not run");
    };
    match format.as_str() {
        "human" => assert_eq!(text, "id Ident Name=x\n"),
        "json" => assert!(text.starts_with("[\n"), "expected JSON, got {text}"),
        other => panic!("unknown output format {other}"),
    }
}

#[scenario(
    path = "tests/features/configuration_precedence.feature",
    name = "Built-in defaults render human output"
)]
fn defaults_render_human_output(#[from(harness)] harness: Harness) {
    let _ = harness;
}

#[scenario(
    path = "tests/features/configuration_precedence.feature",
    name = "A configuration file overrides the defaults"
)]
fn file_overrides_defaults(#[from(harness)] harness: Harness) {
    let _ = harness;
}

#[scenario(
    path = "tests/features/configuration_precedence.feature",
    name = "The environment overrides the configuration file"
)]
fn environment_overrides_file(#[from(harness)] harness: Harness) {
    let _ = harness;
}

#[scenario(
    path = "tests/features/configuration_precedence.feature",
    name = "Flags override the environment"
)]
fn flags_override_environment(#[from(harness)] harness: Harness) {
    let _ = harness;
}
