use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

fn stencil_cmd(home: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("stencil"));
    cmd.env("HOME", home)
        .env("USERPROFILE", home)
        .env("NO_COLOR", "1")
        .env_remove("STENCIL_TEMPLATE_DIR")
        .env_remove("RUST_LOG");
    cmd
}

fn write(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(&path, contents).expect("write file");
    path
}

const REPORT_CONTEXT: &str = r#"{
  "variables": { "title": "Report" },
  "lists": { "rows": [ { "col": "A" }, { "col": "B" } ] }
}"#;

#[test]
fn renders_template_file_to_stdout() {
    let home = TempDir::new().expect("home");
    let work = TempDir::new().expect("work");
    let template = write(
        work.path(),
        "report.html",
        "<h1>{{title}}</h1>{{#each rows}}<p>{{col}}</p>{{/each}}{{missing}}",
    );
    let context = write(work.path(), "report.json", REPORT_CONTEXT);

    let assert = stencil_cmd(home.path())
        .arg("render")
        .arg(&template)
        .arg("--context")
        .arg(&context)
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("stdout utf8");
    assert_eq!(stdout, "<h1>Report</h1><p>A</p><p>B</p>");
}

#[test]
fn renders_with_yaml_context_and_writes_out_file() {
    let home = TempDir::new().expect("home");
    let work = TempDir::new().expect("work");
    let template = write(work.path(), "t.html", "{{#if paid}}PAID {{/if}}{{ref_no}}");
    let context = write(
        work.path(),
        "ctx.yaml",
        "variables:\n  ref_no: INV-9\n  paid: \"1\"\n",
    );
    let out = work.path().join("build/out.html");

    stencil_cmd(home.path())
        .arg("render")
        .arg(&template)
        .arg("-c")
        .arg(&context)
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stdout(contains("wrote"));

    assert_eq!(fs::read_to_string(&out).expect("read out"), "PAID INV-9");
}

#[test]
fn missing_context_renders_placeholders_away() {
    let home = TempDir::new().expect("home");
    let work = TempDir::new().expect("work");
    let template = write(work.path(), "t.html", "a{{x}}b{{#if y}}c{{/if}}");

    let assert = stencil_cmd(home.path())
        .arg("render")
        .arg(&template)
        .assert()
        .success();
    assert_eq!(assert.get_output().stdout, b"ab");
}

#[test]
fn renders_builtin_template_by_name() {
    let home = TempDir::new().expect("home");
    let work = TempDir::new().expect("work");
    let context = write(
        work.path(),
        "letter.json",
        r#"{ "variables": { "recipient_name": "Jane Doe", "subject": "Renewal" } }"#,
    );

    stencil_cmd(home.path())
        .args(["render", "letter", "--builtin", "--context"])
        .arg(&context)
        .assert()
        .success()
        .stdout(contains("Jane Doe"))
        .stdout(contains("<html>"));
}

#[test]
fn unknown_builtin_fails() {
    let home = TempDir::new().expect("home");
    stencil_cmd(home.path())
        .args(["render", "nope", "--builtin"])
        .assert()
        .failure()
        .stderr(contains("unknown template 'nope'"));
}

#[test]
fn missing_context_file_fails_with_path() {
    let home = TempDir::new().expect("home");
    let work = TempDir::new().expect("work");
    let template = write(work.path(), "t.html", "{{x}}");

    stencil_cmd(home.path())
        .arg("render")
        .arg(&template)
        .args(["--context", "absent.json"])
        .assert()
        .failure()
        .stderr(contains("failed to load context from absent.json"));
}

#[test]
fn unsupported_context_extension_fails() {
    let home = TempDir::new().expect("home");
    let work = TempDir::new().expect("work");
    let template = write(work.path(), "t.html", "{{x}}");
    let context = write(work.path(), "ctx.toml", "x = 1");

    stencil_cmd(home.path())
        .arg("render")
        .arg(&template)
        .arg("--context")
        .arg(&context)
        .assert()
        .failure()
        .stderr(contains("failed to load context"));
}

#[test]
fn template_dir_env_overrides_builtin() {
    let home = TempDir::new().expect("home");
    let templates = TempDir::new().expect("templates");
    write(templates.path(), "letter.html", "Dear {{recipient_name}}");
    let work = TempDir::new().expect("work");
    let context = write(
        work.path(),
        "ctx.json",
        r#"{ "variables": { "recipient_name": "Jane" } }"#,
    );

    let assert = stencil_cmd(home.path())
        .env("STENCIL_TEMPLATE_DIR", templates.path())
        .args(["render", "letter", "--builtin", "--context"])
        .arg(&context)
        .assert()
        .success();
    assert_eq!(assert.get_output().stdout, b"Dear Jane");
}

#[test]
fn home_template_dir_is_used_by_default() {
    let home = TempDir::new().expect("home");
    write(home.path(), ".stencil/templates/receipt.html", "Receipt{{n}}");

    let assert = stencil_cmd(home.path())
        .args(["render", "receipt", "--builtin"])
        .assert()
        .success();
    assert_eq!(assert.get_output().stdout, b"Receipt");
}

#[test]
fn templates_lists_builtins_and_user_templates_as_json() {
    let home = TempDir::new().expect("home");
    let templates = TempDir::new().expect("templates");
    write(templates.path(), "Statements/Monthly.html", "{{total}}");
    write(templates.path(), "invoice.html", "custom invoice");

    let assert = stencil_cmd(home.path())
        .arg("templates")
        .arg("--template-dir")
        .arg(templates.path())
        .arg("--json")
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("stdout utf8");
    let rows: serde_json::Value = serde_json::from_str(&stdout).expect("json output");
    let rows = rows.as_array().expect("array of templates");

    let origin_of = |name: &str| {
        rows.iter()
            .find(|row| row["name"] == name)
            .map(|row| row["origin"].as_str().unwrap_or_default().to_string())
    };
    assert_eq!(origin_of("statements/monthly").as_deref(), Some("user"));
    assert_eq!(origin_of("invoice").as_deref(), Some("override"));
    assert_eq!(origin_of("report").as_deref(), Some("built-in"));
    assert_eq!(rows.len(), 9);
}

#[test]
fn templates_table_names_builtins() {
    let home = TempDir::new().expect("home");
    stencil_cmd(home.path())
        .arg("templates")
        .assert()
        .success()
        .stdout(contains("built-in templates only"))
        .stdout(contains("billing_statement"))
        .stdout(contains("sales_summary"))
        .stdout(contains("purchase_order"));
}

#[test]
fn identical_override_is_still_reported_as_override() {
    let home = TempDir::new().expect("home");
    let templates = TempDir::new().expect("templates");
    let report = stencil_renderer::registry::builtin("report").expect("report built-in");
    write(templates.path(), "report.html", report);

    stencil_cmd(home.path())
        .arg("templates")
        .arg("--template-dir")
        .arg(templates.path())
        .arg("--json")
        .assert()
        .success()
        .stdout(contains(r#""origin": "override""#));
}
