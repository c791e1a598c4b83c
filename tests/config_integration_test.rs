//! Integration tests for configuration loading

use secrecy::ExposeSecret;
use shroud::config::load_config;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn full_config_round_trip() {
    let file = write_config(
        r#"
[application]
name = "shroud"
log_level = "debug"

[server]
host = "127.0.0.1"
port = 9100

[ner]
enabled = true
endpoint = "https://inference.example.com/models/ner"
timeout_seconds = 10

[ner.label_map]
PER = "PERSON"
LOC = "LOCATION"

[analysis]
score_threshold = 0.6

[logging]
local_enabled = true
local_path = "logs/test.log"
local_rotation = "hourly"
"#,
    );

    let config = load_config(file.path()).unwrap();
    assert_eq!(config.application.log_level, "debug");
    assert_eq!(config.server.port, 9100);
    assert!(config.ner.enabled);
    assert_eq!(config.ner.timeout_seconds, 10);
    assert_eq!(config.analysis.score_threshold, 0.6);
    assert_eq!(config.logging.local_rotation, "hourly");

    let label_map = config.ner.category_label_map().unwrap().unwrap();
    assert_eq!(label_map.len(), 2);
}

#[test]
fn api_token_substituted_from_environment() {
    std::env::set_var("SHROUD_IT_NER_TOKEN", "hf_secret_value");
    let file = write_config(
        r#"
[ner]
enabled = true
endpoint = "https://inference.example.com/models/ner"
api_token = "${SHROUD_IT_NER_TOKEN}"
"#,
    );

    let config = load_config(file.path()).unwrap();
    let token = config.ner.api_token.expect("token should be set");
    assert_eq!(token.expose_secret(), "hf_secret_value");
    std::env::remove_var("SHROUD_IT_NER_TOKEN");
}

#[test]
fn invalid_enum_like_values_fail_validation() {
    let file = write_config(
        r#"
[logging]
local_rotation = "weekly"
"#,
    );
    assert!(load_config(file.path()).is_err());
}

#[test]
fn unknown_label_map_category_fails() {
    let file = write_config(
        r#"
[ner.label_map]
ORG = "ORGANIZATION"
"#,
    );
    let error = load_config(file.path()).unwrap_err();
    assert!(error.to_string().contains("ORGANIZATION"));
}

#[test]
fn ner_endpoint_must_be_http_url_when_enabled() {
    let file = write_config(
        r#"
[ner]
enabled = true
endpoint = "ftp://example.com"
"#,
    );
    assert!(load_config(file.path()).is_err());
}
