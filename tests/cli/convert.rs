//! Tests for `ssm convert`.

use crate::support::*;
use ssm::core::live::encode_value;

fn legacy(t: &Test) {
    t.raw_live_secret(
        "legacy",
        "prod",
        "Opaque",
        &[
            ("user".into(), encode_value("alice")),
            ("broken".into(), "not-base64!".into()),
            ("password".into(), encode_value("hunter2")),
        ],
    );
}

#[test]
fn test_convert_skips_malformed_value() {
    let t = Test::new();
    legacy(&t);

    let output = t.run(&["convert", "legacy", "-n", "prod"], "n\n");
    assert_success(&output);
    assert_stdout_contains(&output, "found 3 data fields");
    assert_stdout_contains(&output, "could not decode key 'broken'");
    assert_stdout_contains(&output, "Generated SealedSecret");

    let sealed = t.read("legacy.yaml");
    assert!(sealed.contains("kind: SealedSecret"));
    assert!(sealed.contains(&format!("user: {}", encode_value("alice"))));
    assert!(sealed.contains(&format!("password: {}", encode_value("hunter2"))));
    assert!(!sealed.contains("broken"));
    assert!(!t.calls("kubectl").contains("apply"));
    assert!(t.leftovers().is_empty());
}

#[test]
fn test_convert_output_path() {
    let t = Test::new();
    legacy(&t);

    let output = t.run(
        &["convert", "legacy", "-n", "prod", "--output", "out.yaml"],
        "n\n",
    );
    assert_success(&output);
    assert!(t.path("out.yaml").exists());
    assert!(!t.path("legacy.yaml").exists());
}

#[test]
fn test_convert_and_apply() {
    let t = Test::new();
    legacy(&t);

    let output = t.run(&["convert", "legacy", "-n", "prod"], "y\n");
    assert_success(&output);
    assert!(t.calls("kubectl").contains("apply -f"));
    assert_stdout_contains(&output, "sealedsecret.bitnami.com/legacy configured");
}

#[test]
fn test_convert_nothing_decodable() {
    let t = Test::new();
    t.raw_live_secret("junk", "prod", "Opaque", &[("a".into(), "not-base64!".into())]);

    let output = t.run(&["convert", "junk", "-n", "prod"], "");
    assert_failure(&output);
    assert_stderr_contains(&output, "no decodable data found in secret 'junk'");
    assert!(!t.path("junk.yaml").exists());
}

#[test]
fn test_convert_missing_secret() {
    let t = Test::new();
    let output = t.run(&["convert", "nope", "-n", "prod"], "");
    assert_failure(&output);
    assert_stderr_contains(&output, "not found");
}
