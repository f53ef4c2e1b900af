use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Environment variables read by the config layer; cleared for binary tests.
#[allow(dead_code)]
pub const ENV_VARS: [&str; 9] = [
    "OIDC_LOGIN_GRANT_TYPE",
    "OIDC_LOGIN_LISTEN_ADDRESS",
    "OIDC_LOGIN_SKIP_OPEN_BROWSER",
    "OIDC_LOGIN_REDIRECT_URL_HOSTNAME",
    "OIDC_LOGIN_USERNAME",
    "OIDC_LOGIN_PASSWORD",
    "OIDC_LOGIN_ISSUER_URL",
    "OIDC_LOGIN_CLIENT_ID",
    "OIDC_LOGIN_CLIENT_SECRET",
];

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}

/// A config path inside a fresh tempdir that does not exist.
#[allow(dead_code)]
pub fn missing_config_file() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("absent.yaml");
    (temp_dir, config_path)
}
