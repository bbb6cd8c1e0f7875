//! Tests for `ssm create`.

use crate::support::*;
use ssm::core::live::encode_value;
use std::fs;

#[test]
fn test_create_writes_sealed_manifest() {
    let t = Test::new();
    let output = t.run(
        &["create", "foo", "--namespace", "ns1"],
        "user\nalice\npassword\nhunter2\n\nn\n",
    );
    assert_success(&output);
    assert_stdout_contains(&output, "created");

    let sealed = t.read("foo.yaml");
    assert!(sealed.contains("kind: SealedSecret"));
    assert!(sealed.contains("name: foo"));
    assert!(sealed.contains("namespace: ns1"));
    assert!(sealed.contains(&format!("user: {}", encode_value("alice"))));
    assert!(sealed.contains(&format!("password: {}", encode_value("hunter2"))));
    assert!(!sealed.contains("hunter2"));

    assert!(!t.calls("kubectl").contains("apply"));
    assert!(t
        .calls("kubeseal")
        .contains("--controller-namespace=sealed-secrets -o yaml"));
}

#[test]
fn test_create_masks_sensitive_prompts() {
    let t = Test::new();
    let output = t.run(
        &["create", "foo", "-n", "ns1"],
        "user\nalice\napi_token\nt0k3n\n\nn\n",
    );
    assert_success(&output);
    assert_stdout_contains(&output, "Value for 'api_token' (hidden)");
    assert_stdout_excludes(&output, "Value for 'user' (hidden)");
}

#[test]
fn test_create_and_apply() {
    let t = Test::new();
    let output = t.run(&["create", "foo", "-n", "ns1"], "user\nalice\n\ny\n");
    assert_success(&output);
    assert_stdout_contains(&output, "sealedsecret.bitnami.com/foo configured");
    assert!(t.calls("kubectl").contains("apply -f"));
    assert!(t.live_path("foo", "ns1").exists());
}

#[test]
fn test_create_default_namespace() {
    let t = Test::new();
    let output = t.run(&["create", "foo"], "user\nalice\n\nn\n");
    assert_success(&output);
    assert!(t.read("foo.yaml").contains("namespace: default"));
}

#[test]
fn test_create_without_data_fails() {
    let t = Test::new();
    let output = t.run(&["create", "foo", "-n", "ns1"], "\n");
    assert_failure(&output);
    assert_stderr_contains(&output, "no data provided");
    assert!(!t.path("foo.yaml").exists());
    assert!(t.calls("kubeseal").is_empty());
}

#[test]
fn test_create_sealing_failure_cleans_up() {
    let t = Test::new();
    let output = t
        .cmd()
        .args(["create", "foo", "-n", "ns1"])
        .env("FAKE_KUBESEAL_FAIL", "error: cannot fetch certificate")
        .write_stdin("user\nalice\n\n")
        .output()
        .unwrap();

    assert_failure(&output);
    assert_stderr_contains(&output, "cannot fetch certificate");
    assert_stderr_contains(&output, "exit code 2");
    assert_stderr_contains(&output, "--controller-namespace=sealed-secrets");
    assert!(!t.path("foo.yaml").exists());
    assert!(t.leftovers().is_empty(), "plaintext left behind");
}

#[test]
fn test_create_leaves_no_plaintext() {
    let t = Test::new();
    t.create("foo", "ns1", &[("password", "hunter2")]);
    assert!(t.leftovers().is_empty(), "plaintext left behind");
}

#[test]
fn test_create_controller_namespace_flag() {
    let t = Test::new();
    let output = t.run(
        &["--controller-namespace", "kube-system", "create", "foo"],
        "user\nalice\n\nn\n",
    );
    assert_success(&output);
    assert!(t.calls("kubeseal").contains("--controller-namespace=kube-system"));
}

#[test]
fn test_create_controller_namespace_env() {
    let t = Test::new();
    let output = t
        .cmd()
        .args(["create", "foo"])
        .env("SSM_CONTROLLER_NAMESPACE", "from-env")
        .write_stdin("user\nalice\n\nn\n")
        .output()
        .unwrap();
    assert_success(&output);
    assert!(t.calls("kubeseal").contains("--controller-namespace=from-env"));
}

#[test]
fn test_create_in_dir() {
    let t = Test::new();
    let output = t.run(&["--dir", "sealed", "create", "foo"], "user\nalice\n\nn\n");
    assert_success(&output);
    assert!(t.path("sealed").join("foo.yaml").exists());
    assert!(!t.path("foo.yaml").exists());
}

#[test]
fn test_create_uses_settings_file() {
    let t = Test::new();
    fs::write(
        t.path(".ssm.toml"),
        "controller_namespace = \"kube-system\"\nnamespace = \"staging\"\n",
    )
    .unwrap();

    let output = t.run(&["create", "foo"], "user\nalice\n\nn\n");
    assert_success(&output);
    assert!(t.read("foo.yaml").contains("namespace: staging"));
    assert!(t.calls("kubeseal").contains("--controller-namespace=kube-system"));
}
