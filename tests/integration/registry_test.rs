//! Registry loading from disk and the `LNK_DIR` override.

use apilink::config::{config_dir, default_config_path, CONFIG_FILE_NAME, LINK_DIR_ENV};
use apilink::{ApiLink, ConfigError, LinkError};
use serial_test::serial;
use std::fs;
use tempfile::TempDir;

use super::init_test_env;

fn write_config(dir: &TempDir, body: &str) {
    fs::write(dir.path().join(CONFIG_FILE_NAME), body).expect("Failed to write link.config");
}

#[test]
#[serial]
fn test_load_uses_lnk_dir() {
    init_test_env();
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/v1/ping")
        .match_header("authorization", "Basic Ym90OnRva2Vu")
        .match_header("x-client", "registry-test")
        .with_body(r#"{"pong": true}"#)
        .create();

    let dir = TempDir::new().unwrap();
    write_config(
        &dir,
        &format!(
            r#"{{
                "apis": {{
                    "svc": {{
                        "base_url": "{}/v1/",
                        "user": "bot",
                        "password": "token",
                        "headers": {{ "X-Client": "registry-test" }},
                        "timeout_secs": 5
                    }}
                }}
            }}"#,
            server.url()
        ),
    );
    std::env::set_var(LINK_DIR_ENV, dir.path());

    let link = ApiLink::load().unwrap();
    let svc = link.wrapper("svc").unwrap();
    let response = svc.get("ping", true).unwrap();

    mock.assert();
    assert_eq!(response.name(), Some("svc"));
    assert_eq!(response.json().unwrap()["pong"], true);

    std::env::remove_var(LINK_DIR_ENV);
}

#[test]
#[serial]
fn test_default_path_follows_lnk_dir() {
    let dir = TempDir::new().unwrap();
    std::env::set_var(LINK_DIR_ENV, dir.path());

    assert_eq!(config_dir(), Some(dir.path().to_path_buf()));
    assert_eq!(
        default_config_path().unwrap(),
        dir.path().join(CONFIG_FILE_NAME)
    );

    std::env::remove_var(LINK_DIR_ENV);
}

#[test]
#[serial]
fn test_empty_lnk_dir_falls_back_to_home() {
    std::env::set_var(LINK_DIR_ENV, "");

    if let Some(home) = dirs::home_dir() {
        assert_eq!(config_dir(), Some(home.join(".link")));
    }

    std::env::remove_var(LINK_DIR_ENV);
}

#[test]
#[serial]
fn test_load_without_config_file() {
    let dir = TempDir::new().unwrap();
    std::env::set_var(LINK_DIR_ENV, dir.path());

    let err = ApiLink::load().unwrap_err();
    assert!(matches!(err, LinkError::Config(ConfigError::NotFound(_))));

    std::env::remove_var(LINK_DIR_ENV);
}

#[test]
fn test_from_path_rejects_invalid_entry() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, r#"{"apis": {"bad": {"base_url": "ftp://files.example.com"}}}"#);

    let err = ApiLink::from_path(dir.path().join(CONFIG_FILE_NAME)).unwrap_err();
    match err {
        LinkError::Config(ConfigError::InvalidApi { api, reason }) => {
            assert_eq!(api, "bad");
            assert!(reason.contains("scheme"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}
