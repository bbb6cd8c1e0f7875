//! Tests for `ssm update`.

use crate::support::*;
use ssm::core::live::encode_value;
use std::fs;

/// `foo.yaml` with three keys, applied so the live secret exists.
fn applied_foo() -> Test {
    let t = Test::new();
    let output = t.run(
        &["create", "foo", "-n", "ns1"],
        "user\nalice\npassword\nold\nhost\ndb\n\ny\n",
    );
    assert_success(&output);
    t
}

#[test]
fn test_update_selected_key() {
    let t = applied_foo();
    let before = t.read("foo.yaml");

    let output = t.run(&["update", "foo.yaml"], "2\n1\nbob\nn\n");
    assert_success(&output);
    assert_stdout_contains(&output, "1. user");
    assert_stdout_contains(&output, "3. host");

    let after = t.read("foo.yaml");
    assert!(after.contains(&format!("user: {}", encode_value("bob"))));
    assert!(after.contains(&format!("password: {}", encode_value("old"))));
    assert!(after.contains(&format!("host: {}", encode_value("db"))));
    assert_eq!(t.read("foo.yaml.backup"), before);
    assert!(t.leftovers().is_empty());
}

#[test]
fn test_update_prompts_once_per_key() {
    let t = applied_foo();
    let output = t.run(&["update", "foo.yaml"], "2\n1,1,1-1\nbob\nn\n");
    assert_success(&output);
    assert_eq!(stdout(&output).matches("New value for 'user'").count(), 1);
}

#[test]
fn test_update_masks_sensitive_key() {
    let t = applied_foo();
    let output = t.run(&["update", "foo.yaml"], "2\n2\nnew\nn\n");
    assert_success(&output);
    assert_stdout_contains(&output, "New value for 'password' (hidden)");
    assert!(t
        .read("foo.yaml")
        .contains(&format!("password: {}", encode_value("new"))));
}

#[test]
fn test_update_all_keys() {
    let t = applied_foo();
    let output = t.run(&["update", "foo.yaml"], "2\nALL\na\nb\nc\nn\n");
    assert_success(&output);
    let after = t.read("foo.yaml");
    assert!(after.contains(&format!("user: {}", encode_value("a"))));
    assert!(after.contains(&format!("host: {}", encode_value("c"))));
}

#[test]
fn test_update_add_keeps_live_values() {
    let t = applied_foo();
    let output = t.run(&["update", "foo.yaml"], "1\nregion\neu\n\nn\n");
    assert_success(&output);

    let after = t.read("foo.yaml");
    assert!(after.contains(&format!("user: {}", encode_value("alice"))));
    assert!(after.contains(&format!("region: {}", encode_value("eu"))));
}

#[test]
fn test_update_without_live_secret_warns() {
    let t = Test::new();
    t.create("foo", "ns1", &[("user", "alice")]);

    let output = t.run(&["update", "foo.yaml"], "1\nregion\neu\n\nn\n");
    assert_success(&output);
    assert_stdout_contains(&output, "could not read live secret");
    assert_stdout_contains(&output, "continuing with an empty baseline");
    assert!(!stderr(&output).contains("empty baseline"));

    let after = t.read("foo.yaml");
    assert!(after.contains("region:"));
    assert!(!after.contains("user:"));
}

#[test]
fn test_update_backups_accumulate() {
    let t = applied_foo();
    for value in ["b", "c", "d"] {
        let output = t.run(&["update", "foo.yaml"], &format!("2\n1\n{}\nn\n", value));
        assert_success(&output);
    }

    assert!(t.path("foo.yaml.backup").exists());
    assert!(t.path("foo.yaml.backup.1").exists());
    assert!(t.path("foo.yaml.backup.2").exists());
    assert!(!t.path("foo.yaml.backup.3").exists());
}

#[test]
fn test_update_invalid_selection() {
    let t = applied_foo();
    let before = t.read("foo.yaml");

    let output = t.run(&["update", "foo.yaml"], "2\nabc\n");
    assert_failure(&output);
    assert_stderr_contains(&output, "invalid selection format");
    assert_eq!(t.read("foo.yaml"), before);
    assert!(!t.path("foo.yaml.backup").exists());
}

#[test]
fn test_update_inverted_range() {
    let t = applied_foo();
    let output = t.run(&["update", "foo.yaml"], "2\n2-1\n");
    assert_failure(&output);
    assert_stderr_contains(&output, "invalid selection format");
}

#[test]
fn test_update_out_of_range_selection() {
    let t = applied_foo();
    let output = t.run(&["update", "foo.yaml"], "2\n9\n");
    assert_failure(&output);
    assert_stderr_contains(&output, "no valid keys selected");
}

#[test]
fn test_update_invalid_choice() {
    let t = applied_foo();
    let output = t.run(&["update", "foo.yaml"], "3\n");
    assert_failure(&output);
    assert_stderr_contains(&output, "invalid choice");
}

#[test]
fn test_update_sealing_failure_keeps_original() {
    let t = applied_foo();
    let before = t.read("foo.yaml");

    let output = t
        .cmd()
        .args(["update", "foo.yaml"])
        .env("FAKE_KUBESEAL_FAIL", "boom")
        .write_stdin("2\n1\nbob\n")
        .output()
        .unwrap();
    assert_failure(&output);
    assert_eq!(t.read("foo.yaml"), before);
    assert!(!t.path("foo.yaml.backup").exists());
    assert!(t.leftovers().is_empty());
}

#[test]
fn test_update_missing_file() {
    let t = Test::new();
    let output = t.run(&["update", "nope.yaml"], "");
    assert_failure(&output);
    assert_stderr_contains(&output, "file not found");
}

#[test]
fn test_update_rejects_plain_secret() {
    let t = Test::new();
    fs::write(
        t.path("plain.yaml"),
        "apiVersion: v1\nkind: Secret\nmetadata:\n  name: a\n  namespace: b\n",
    )
    .unwrap();
    let output = t.run(&["update", "plain.yaml"], "");
    assert_failure(&output);
    assert_stderr_contains(&output, "not a SealedSecret");
}

#[test]
fn test_update_missing_namespace() {
    let t = Test::new();
    fs::write(
        t.path("bad.yaml"),
        "kind: SealedSecret\nmetadata:\n  name: a\nspec:\n  encryptedData: {}\n",
    )
    .unwrap();
    let output = t.run(&["update", "bad.yaml"], "");
    assert_failure(&output);
    assert_stderr_contains(&output, "metadata.namespace");
}
