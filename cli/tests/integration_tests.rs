use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

/// Helper to create a temp directory that is cleaned up on drop.
struct TempDir {
    path: PathBuf,
}

impl TempDir {
    fn new(name: &str) -> Self {
        let path = std::env::temp_dir().join(format!("spec_map_cli_test_{name}_{}", std::process::id()));
        let _ = fs::remove_dir_all(&path);
        fs::create_dir_all(&path).expect("failed to create temp dir");
        Self { path }
    }

    fn path(&self) -> &PathBuf {
        &self.path
    }

    fn join(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn fixture_str(name: &str) -> String {
    fixture(name).display().to_string()
}

fn spec_map(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_spec-map"))
        .args(args)
        .output()
        .expect("failed to run spec-map")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// ---------------------------------------------------------------------------
// Console report
// ---------------------------------------------------------------------------

#[test]
fn prints_report_reconciled_with_requirements() {
    let app = fixture_str("app_test.dart");
    let login = fixture_str("login_test.dart");
    let reqs = fixture_str("requirements.md");

    let output = spec_map(&["--reqs", &reqs, &app, &login]);
    assert!(output.status.success(), "spec-map failed: {}", stderr(&output));

    let expected = format!(
        "\
login: Users can sign in and out
  - user can sign in ({app})
  - user can sign out ({login})

checkout: Users must be able to pay
  - user can pay with a saved card ({app})

refunds: Users can request a refund
  (no specifications found)

search: (no requirement description available)
  - results are listed ({app})

(untagged specifications)
  - app starts without crashing ({app})

"
    );
    assert_eq!(stdout(&output), expected);
}

#[test]
fn prints_orphan_tags_without_requirements() {
    let login = fixture_str("login_test.dart");

    let output = spec_map(&[&login]);
    assert!(output.status.success(), "spec-map failed: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        format!("login: (no requirement description available)\n  - user can sign out ({login})\n\n")
    );
}

#[test]
fn file_order_decides_first_seen_tag_order() {
    let app = fixture_str("app_test.dart");
    let login = fixture_str("login_test.dart");

    let output = spec_map(&[&login, &app]);
    assert!(output.status.success(), "spec-map failed: {}", stderr(&output));

    let out = stdout(&output);
    let login_pos = out.find("login:").unwrap();
    let checkout_pos = out.find("checkout:").unwrap();
    assert!(login_pos < checkout_pos, "unexpected order:\n{out}");

    let sign_out = out.find("user can sign out").unwrap();
    let sign_in = out.find("user can sign in").unwrap();
    assert!(sign_out < sign_in, "bucket order should follow file order:\n{out}");
}

#[test]
fn json_format_includes_summary() {
    let app = fixture_str("app_test.dart");
    let reqs = fixture_str("requirements.md");

    let output = spec_map(&["--format", "json", "--reqs", &reqs, &app]);
    assert!(output.status.success(), "spec-map failed: {}", stderr(&output));

    let parsed: serde_json::Value = serde_json::from_str(&stdout(&output))
        .unwrap_or_else(|e| panic!("Invalid JSON output: {e}"));
    assert_eq!(parsed["summary"]["files_scanned"], 1);
    assert_eq!(parsed["summary"]["test_cases"], 4);
    assert_eq!(parsed["summary"]["requirements"], 3);
    assert_eq!(parsed["summary"]["uncovered_requirements"], 1);
    assert_eq!(parsed["summary"]["orphan_tags"], 1);
    assert_eq!(parsed["sections"][0]["heading"]["tag"], "login");
}

#[test]
fn scan_tag_mode_is_selectable() {
    let dir = TempDir::new("scan_mode");
    let test_file = dir.join("multi_test.dart");
    fs::write(&test_file, "patrolTest('A: B: rest', ($) async {});\n").unwrap();
    let path = test_file.display().to_string();

    let prefix = stdout(&spec_map(&[&path]));
    assert_eq!(
        prefix,
        format!("A: (no requirement description available)\n  - B: rest ({path})\n\n")
    );

    let scan = stdout(&spec_map(&["--tag-mode", "scan", &path]));
    assert_eq!(
        scan,
        format!(
            "A: (no requirement description available)\n  - rest ({path})\n\n\
             B: (no requirement description available)\n  - rest ({path})\n\n"
        )
    );
}

#[test]
fn custom_test_function_names() {
    let login = fixture_str("login_test.dart");

    let output = spec_map(&["--test-fn", "testWidgets", &login]);
    assert!(output.status.success(), "spec-map failed: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        format!("widget: (no requirement description available)\n  - not a patrol test ({login})\n\n")
    );
}

// ---------------------------------------------------------------------------
// Storing the markdown map
// ---------------------------------------------------------------------------

#[test]
fn store_writes_markdown_and_creates_directories() {
    let dir = TempDir::new("store");
    let test_file = dir.join("app_test.dart");
    fs::write(&test_file, "patrolTest('checkout: user can pay', ($) async {});\n").unwrap();
    let reqs = dir.join("requirements.md");
    fs::write(&reqs, "| Tag | Description |\n|---|---|\n| checkout | Users must be able to pay |\n")
        .unwrap();
    let map = dir.join("docs").join("nested").join("specifications-map.md");

    let test_path = test_file.display().to_string();
    let output = spec_map(&[
        "--store",
        "--spec-map",
        &map.display().to_string(),
        "--reqs",
        &reqs.display().to_string(),
        &test_path,
    ]);
    assert!(output.status.success(), "spec-map failed: {}", stderr(&output));
    assert!(stderr(&output).contains("Storing specification map in"));

    let markdown = fs::read_to_string(&map).expect("map should be written");
    assert_eq!(
        markdown,
        format!(
            "# Specifications Map (generated)\n\n\
             - **checkout: Users must be able to pay**\n    - user can pay *({test_path})*\n"
        )
    );
}

#[test]
fn store_overwrites_existing_map() {
    let dir = TempDir::new("store_overwrite");
    let map = dir.join("map.md");
    fs::write(&map, "old content\n".repeat(100)).unwrap();
    let login = fixture_str("login_test.dart");

    let output = spec_map(&["--store", "--spec-map", &map.display().to_string(), &login]);
    assert!(output.status.success(), "spec-map failed: {}", stderr(&output));

    let markdown = fs::read_to_string(&map).unwrap();
    assert!(!markdown.contains("old content"));
    assert!(markdown.starts_with("# Specifications Map (generated)\n\n- **login:**"));
}

#[test]
fn without_store_nothing_is_written() {
    let dir = TempDir::new("no_store");
    let map = dir.join("map.md");
    let login = fixture_str("login_test.dart");

    let output = spec_map(&["--spec-map", &map.display().to_string(), &login]);
    assert!(output.status.success());
    assert!(!map.exists());
}

// ---------------------------------------------------------------------------
// Configuration file
// ---------------------------------------------------------------------------

#[test]
fn config_file_supplies_inputs_and_flags_override() {
    let dir = TempDir::new("config");
    let map = dir.join("from-config.md");
    let config = dir.join("spec-map.yml");
    fs::write(
        &config,
        format!(
            "test_files:\n  - {}\nrequirements: {}\nspec_map: {}\nstore: true\n",
            fixture_str("login_test.dart"),
            fixture_str("requirements.md"),
            map.display()
        ),
    )
    .unwrap();

    let output = spec_map(&["--config", &config.display().to_string()]);
    assert!(output.status.success(), "spec-map failed: {}", stderr(&output));
    assert!(stdout(&output).starts_with("login: Users can sign in and out\n"));
    assert!(map.exists());

    let other = dir.join("flag.md");
    let output = spec_map(&[
        "--config",
        &config.display().to_string(),
        "--spec-map",
        &other.display().to_string(),
    ]);
    assert!(output.status.success(), "spec-map failed: {}", stderr(&output));
    assert!(other.exists());
    assert!(dir.path().join("flag.md").exists());
}

#[test]
fn invalid_config_file_fails() {
    let dir = TempDir::new("bad_config");
    let config = dir.join("spec-map.yml");
    fs::write(&config, "unknown_key: 1\n").unwrap();

    let output = spec_map(&["--config", &config.display().to_string()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).starts_with("error: invalid config file"));
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[test]
fn no_test_files_prints_usage() {
    let output = spec_map(&[]);
    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("Please specify test files"), "stderr: {err}");
    assert!(err.contains("Usage:"), "stderr: {err}");
    assert!(stdout(&output).is_empty());
}

#[test]
fn missing_test_file_fails_without_report() {
    let app = fixture_str("app_test.dart");
    let dir = TempDir::new("missing_test");
    let missing = dir.join("missing_test.dart");

    let output = spec_map(&[&app, &missing.display().to_string()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("missing_test.dart"));
}

#[test]
fn missing_requirements_file_fails() {
    let app = fixture_str("app_test.dart");
    let dir = TempDir::new("missing_reqs");
    let reqs = dir.join("requirements.md");

    let output = spec_map(&["--reqs", &reqs.display().to_string(), &app]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).starts_with("error: "));
}

#[test]
fn unwritable_spec_map_fails_after_report() {
    let dir = TempDir::new("unwritable");
    let blocker = dir.join("blocker");
    fs::write(&blocker, "not a directory").unwrap();
    let map = blocker.join("map.md");
    let login = fixture_str("login_test.dart");

    let output = spec_map(&["--store", "--spec-map", &map.display().to_string(), &login]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).starts_with("login:"));
    assert!(stderr(&output).contains("error: "));
}
