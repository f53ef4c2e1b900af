//! Binary tests for the `resolve` and `plan` commands
//!
//! Every run points `--config` at a path inside a tempdir and clears the
//! `OIDC_LOGIN_*` environment so the host cannot influence the result.

#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};

mod common;

fn oidc_login(config: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("oidc-login").unwrap();
    for var in common::ENV_VARS {
        cmd.env_remove(var);
    }
    cmd.env_remove("RUST_LOG");
    cmd.arg("--config").arg(config);
    cmd
}

fn stdout_json(cmd: &mut Command) -> Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).expect("stdout is JSON")
}

#[test]
fn test_resolve_defaults() {
    let (_dir, config) = common::missing_config_file();
    let value = stdout_json(oidc_login(&config).arg("resolve"));
    assert_eq!(
        value,
        json!({
            "grant": "authcode",
            "bind_address": ["127.0.0.1:8000", "127.0.0.1:18000"],
            "skip_open_browser": false,
            "redirect_url_hostname": "localhost",
            "auth_request_extra_params": {},
        })
    );
}

#[test]
fn test_resolve_full_authcode_options() {
    let (_dir, config) = common::missing_config_file();
    let value = stdout_json(oidc_login(&config).args([
        "resolve",
        "--grant-type",
        "authcode",
        "--listen-port",
        "10080",
        "--listen-port",
        "20080",
        "--skip-open-browser",
        "--username",
        "USER",
        "--password",
        "PASS",
    ]));
    assert_eq!(value["grant"], "authcode");
    assert_eq!(
        value["bind_address"],
        json!(["127.0.0.1:10080", "127.0.0.1:20080"])
    );
    assert_eq!(value["skip_open_browser"], true);
}

#[test]
fn test_resolve_grant_type_password() {
    let (_dir, config) = common::missing_config_file();
    let mut cmd = oidc_login(&config);
    cmd.args([
        "resolve",
        "--grant-type",
        "password",
        "--listen-port",
        "10080",
        "--listen-port",
        "20080",
        "--username",
        "USER",
        "--password",
        "PASS",
    ]);
    let value = stdout_json(&mut cmd);
    assert_eq!(value, json!({"grant": "password", "username": "USER"}));
}

#[test]
fn test_resolve_grant_type_auto_with_username() {
    let (_dir, config) = common::missing_config_file();
    let value = stdout_json(oidc_login(&config).args([
        "resolve",
        "--listen-port",
        "10080",
        "--listen-port",
        "20080",
        "--username",
        "USER",
        "--password",
        "PASS",
    ]));
    assert_eq!(value, json!({"grant": "password", "username": "USER"}));
}

#[test]
fn test_resolve_keyboard_with_extra_params() {
    let (_dir, config) = common::missing_config_file();
    let value = stdout_json(oidc_login(&config).args([
        "resolve",
        "--grant-type",
        "authcode-keyboard",
        "--oidc-auth-request-extra-params",
        "ttl=86400,reauth=false",
    ]));
    assert_eq!(
        value,
        json!({
            "grant": "authcode-keyboard",
            "auth_request_extra_params": {"reauth": "false", "ttl": "86400"},
        })
    );
}

#[test]
fn test_resolve_password_is_not_printed() {
    let (_dir, config) = common::missing_config_file();
    oidc_login(&config)
        .args(["resolve", "--username", "USER", "--password", "hunter2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hunter2").not())
        .stderr(predicate::str::contains("hunter2").not());
}

#[test]
fn test_resolve_unsupported_grant_type() {
    let (_dir, config) = common::missing_config_file();
    oidc_login(&config)
        .args(["resolve", "--grant-type", "implicit"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "grant-type must be one of (auto|authcode|authcode-keyboard|password)",
        ));
}

#[test]
fn test_resolve_empty_grant_type_names_allowed_set() {
    let (_dir, config) = common::missing_config_file();
    oidc_login(&config)
        .args(["resolve", "--grant-type", ""])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "grant-type must be one of (auto|authcode|authcode-keyboard|password)",
        ));
}

#[test]
fn test_resolve_too_many_args() {
    let (_dir, config) = common::missing_config_file();
    oidc_login(&config)
        .args(["resolve", "some"])
        .assert()
        .failure();
}

#[test]
fn test_resolve_reads_config_file() {
    let (_dir, config) = common::temp_config_file(
        "authentication:\n  grant_type: authcode\n  listen_address:\n    - 127.0.0.1:9000\n  redirect_url_hostname: example.local\n",
    );
    let value = stdout_json(oidc_login(&config).arg("resolve"));
    assert_eq!(value["bind_address"], json!(["127.0.0.1:9000"]));
    assert_eq!(value["redirect_url_hostname"], "example.local");
}

#[test]
fn test_env_overrides_config_file() {
    let (_dir, config) =
        common::temp_config_file("authentication:\n  grant_type: authcode\n");
    let value = stdout_json(
        oidc_login(&config)
            .env("OIDC_LOGIN_GRANT_TYPE", "auto")
            .env("OIDC_LOGIN_USERNAME", "env-user")
            .arg("resolve"),
    );
    assert_eq!(value, json!({"grant": "password", "username": "env-user"}));
}

#[test]
fn test_invalid_config_is_rejected() {
    let (_dir, config) = common::temp_config_file("authentication:\n  listen_address: []\n");
    oidc_login(&config)
        .arg("resolve")
        .assert()
        .failure()
        .stderr(predicate::str::contains("listen_address"));
}

#[test]
fn test_empty_listen_address_with_ports_is_accepted() {
    let (_dir, config) = common::temp_config_file(
        "authentication:\n  grant_type: authcode\n  listen_address: []\n  listen_port: [10080]\n",
    );
    let value = stdout_json(oidc_login(&config).arg("resolve"));
    assert_eq!(value["bind_address"], json!(["127.0.0.1:10080"]));
}

#[test]
fn test_verbose_after_subcommand() {
    let (_dir, config) = common::missing_config_file();
    let value = stdout_json(oidc_login(&config).args(["resolve", "-v", "--json-logs"]));
    assert_eq!(value["grant"], "authcode");
}

#[test]
fn test_plan_defaults() {
    let (_dir, config) = common::missing_config_file();
    let value = stdout_json(oidc_login(&config).args([
        "plan",
        "--oidc-issuer-url",
        "https://issuer.example.com",
        "--oidc-client-id",
        "YOUR_CLIENT_ID",
    ]));
    assert_eq!(value["provider"]["issuer_url"], "https://issuer.example.com/");
    assert_eq!(value["provider"]["client_id"], "YOUR_CLIENT_ID");
    assert_eq!(value["provider"]["scopes"], json!(["openid"]));
    assert_eq!(value["provider"]["has_client_secret"], false);
    assert_eq!(value["grant"]["grant"], "authcode");
}

#[test]
fn test_plan_full_options_hide_secret() {
    let (_dir, config) = common::missing_config_file();
    let assert = oidc_login(&config)
        .args([
            "plan",
            "--oidc-issuer-url",
            "https://issuer.example.com",
            "--oidc-client-id",
            "YOUR_CLIENT_ID",
            "--oidc-client-secret",
            "YOUR_CLIENT_SECRET",
            "--oidc-extra-scope",
            "email",
            "--oidc-extra-scope",
            "profile",
            "--insecure-skip-tls-verify",
            "--grant-type",
            "authcode",
            "--listen-port",
            "10080",
            "--skip-open-browser",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("YOUR_CLIENT_SECRET").not());

    let value: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(value["provider"]["scopes"], json!(["openid", "email", "profile"]));
    assert_eq!(value["provider"]["has_client_secret"], true);
    assert_eq!(value["provider"]["skip_tls_verify"], true);
    assert_eq!(value["grant"]["bind_address"], json!(["127.0.0.1:10080"]));
}

#[test]
fn test_plan_missing_mandatory_options() {
    let (_dir, config) = common::missing_config_file();
    oidc_login(&config)
        .arg("plan")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--oidc-issuer-url is required"));
}

#[test]
fn test_plan_missing_certificate_authority_file() {
    let (dir, config) = common::missing_config_file();
    oidc_login(&config)
        .args([
            "plan",
            "--oidc-issuer-url",
            "https://issuer.example.com",
            "--oidc-client-id",
            "YOUR_CLIENT_ID",
            "--certificate-authority",
        ])
        .arg(dir.path().join("missing-ca.pem"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Certificate authority error"));
}
