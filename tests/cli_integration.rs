//! CLI integration tests for makeplan.
//!
//! These tests drive the binary from plan creation through Makefile generation.

use std::fs;
use std::path::PathBuf;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get the makeplan binary command, isolated from the user's global config.
fn makeplan(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("makeplan").unwrap();
    cmd.env("HOME", home.path()).env_remove("RUST_LOG");
    cmd
}

/// Create a temporary directory for test projects.
fn temp_dir() -> TempDir {
    TempDir::new().unwrap()
}

fn demo_plan() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("demos")
        .join("basics")
        .join("makeplan.toml")
}

// ============================================================================
// makeplan init
// ============================================================================

#[test]
fn test_init_creates_plan() {
    let tmp = temp_dir();

    makeplan(&tmp)
        .arg("init")
        .current_dir(tmp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Created"));

    let plan = fs::read_to_string(tmp.path().join("makeplan.toml")).unwrap();
    assert!(plan.contains("rule = \"compile\""));
}

#[test]
fn test_init_fails_if_plan_exists() {
    let tmp = temp_dir();
    fs::write(tmp.path().join("makeplan.toml"), "").unwrap();

    makeplan(&tmp)
        .arg("init")
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

// ============================================================================
// makeplan generate
// ============================================================================

#[test]
fn test_init_then_generate() {
    let tmp = temp_dir();

    makeplan(&tmp)
        .arg("init")
        .current_dir(tmp.path())
        .assert()
        .success();

    makeplan(&tmp)
        .arg("generate")
        .current_dir(tmp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Generating"))
        .stderr(predicate::str::contains("Finished"));

    let makefile = fs::read_to_string(tmp.path().join("Makefile")).unwrap();
    assert!(makefile.starts_with("RM = rm\nCC = gcc\n"));
    assert!(makefile.contains(".PHONY: default\ndefault: hello\n"));
    assert!(makefile.ends_with("\n\n"));
}

#[test]
fn test_generate_quiet_prints_nothing() {
    let tmp = temp_dir();
    makeplan(&tmp).arg("init").current_dir(tmp.path()).assert().success();

    makeplan(&tmp)
        .args(["generate", "--quiet"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_generate_without_plan_suggests_init() {
    let tmp = temp_dir();

    makeplan(&tmp)
        .arg("generate")
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not find `makeplan.toml`"))
        .stderr(predicate::str::contains("makeplan init"));
}

#[test]
fn test_generate_demo_to_stdout() {
    let tmp = temp_dir();

    makeplan(&tmp)
        .args(["generate", "--stdout", "--plan"])
        .arg(demo_plan())
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "RM = rm\nROOT_DIR = .\nSRC_DIR = $(ROOT_DIR)/src\n",
        ))
        .stdout(predicate::str::contains(
            ".PHONY: default\ndefault: $(SRC_DIR)/main.exe\n\n",
        ))
        .stdout(predicate::str::contains(
            "\t$(AR) $(ARFLAGS) $(SRC_DIR)/lib.a $(SRC_DIR)/lib.o\n",
        ))
        .stdout(predicate::str::contains(
            "\t$(CC) $(CFLAGS) -I $(LIB_INCLUDE) $(SRC_DIR)/main.o $(SRC_DIR)/lib.a -o $(SRC_DIR)/main.exe\n",
        ))
        .stdout(predicate::str::contains(".PHONY: clean\nclean: \n"));

    assert!(!tmp.path().join("Makefile").exists());
}

#[test]
fn test_generate_json_plan() {
    let tmp = temp_dir();
    makeplan(&tmp).arg("init").current_dir(tmp.path()).assert().success();

    let output = makeplan(&tmp)
        .args(["generate", "--json", "--stdout"])
        .current_dir(tmp.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["vars"][0]["name"], "RM");
    assert_eq!(value["rules"][0]["name"], "main.o");
    assert_eq!(value["rules"][2]["kind"], "phony");
}

#[test]
fn test_generate_reports_rule_error() {
    let tmp = temp_dir();
    fs::write(
        tmp.path().join("makeplan.toml"),
        r#"
[[steps]]
rule = "compile_c"
args = { inp = 5, outp = "a.o", cflags = "-O2" }
"#,
    )
    .unwrap();

    makeplan(&tmp)
        .arg("generate")
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "argument 'inp' has type int but expected string in rule 'compile_c'",
        ))
        .stderr(predicate::str::contains("could not generate build file"));

    assert!(!tmp.path().join("Makefile").exists());
}

#[test]
fn test_generate_reports_unknown_rule() {
    let tmp = temp_dir();
    fs::write(
        tmp.path().join("makeplan.toml"),
        "[[steps]]\nrule = \"link\"\n",
    )
    .unwrap();

    makeplan(&tmp)
        .arg("generate")
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown rule `link`"))
        .stderr(predicate::str::contains("makeplan rules"));
}

#[test]
fn test_generate_respects_project_config() {
    let tmp = temp_dir();
    makeplan(&tmp).arg("init").current_dir(tmp.path()).assert().success();

    fs::create_dir(tmp.path().join(".makeplan")).unwrap();
    fs::write(
        tmp.path().join(".makeplan").join("config.toml"),
        "[generate]\noutput = \"build/GNUmakefile\"\n",
    )
    .unwrap();

    makeplan(&tmp)
        .arg("generate")
        .current_dir(tmp.path())
        .assert()
        .success();

    assert!(tmp.path().join("build").join("GNUmakefile").exists());
    assert!(!tmp.path().join("Makefile").exists());
}

#[test]
fn test_generate_json_messages() {
    let tmp = temp_dir();
    makeplan(&tmp).arg("init").current_dir(tmp.path()).assert().success();

    makeplan(&tmp)
        .args(["generate", "--message-format", "json"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"reason\":\"rule-invoked\""))
        .stdout(predicate::str::contains("\"reason\":\"generated\""));
}

#[test]
fn test_generate_stdout_is_only_the_makefile() {
    let tmp = temp_dir();
    fs::write(
        tmp.path().join("makeplan.toml"),
        r#"
[[steps]]
rule = "phony"
default = true
args = { name = "all", files = ["all"] }
"#,
    )
    .unwrap();

    let expected = concat!(
        "\n",
        ".PHONY: default\ndefault: all\n\n",
        ".PHONY: all\nall: \n",
        "\n",
    );

    makeplan(&tmp)
        .args(["generate", "--stdout"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(expected);

    makeplan(&tmp)
        .args(["generate", "--stdout", "--message-format", "json"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(expected)
        .stderr(predicate::str::contains("\"reason\":\"rule-invoked\""))
        .stderr(predicate::str::contains("\"reason\":\"generated\""));
}

#[test]
fn test_generate_rejects_misspelled_step_key() {
    let tmp = temp_dir();
    fs::write(
        tmp.path().join("makeplan.toml"),
        "[[steps]]\nrule = \"phony\"\ndefualt = true\nargs = { name = \"all\" }\n",
    )
    .unwrap();

    makeplan(&tmp)
        .arg("generate")
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("defualt"));

    assert!(!tmp.path().join("Makefile").exists());
}

// ============================================================================
// makeplan rules
// ============================================================================

#[test]
fn test_rules_lists_builtin_rules() {
    let tmp = temp_dir();

    makeplan(&tmp)
        .arg("rules")
        .assert()
        .success()
        .stdout(predicate::str::contains("compile_c"))
        .stdout(predicate::str::contains("    inp: string\n"))
        .stdout(predicate::str::contains("archive"));
}

#[test]
fn test_rules_json() {
    let tmp = temp_dir();

    let output = makeplan(&tmp).args(["rules", "--json"]).output().unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value[0]["name"], "compile");
    assert_eq!(value[0]["args"][0]["name"], "inputs");
}
