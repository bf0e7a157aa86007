// Config loading from TOML files

use meet_room::Config;
use std::io::Write;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_full_config() {
    let file = write_config(
        r#"
[service]
name = "meet-room"

[service.http]
bind = "0.0.0.0"
port = 9000

[tokens]
secret = "s3cret"
ttl_secs = 120

[client]
action_url = "http://meet.local:9000"
viewport_width = 800
"#,
    );

    let cfg = Config::load(file.path().to_str().unwrap()).unwrap();

    assert_eq!(cfg.service.name, "meet-room");
    assert_eq!(cfg.bind_addr(), "0.0.0.0:9000");
    assert_eq!(cfg.tokens.secret, "s3cret");
    assert_eq!(cfg.tokens.ttl_secs, 120);
    assert_eq!(cfg.client.action_url, "http://meet.local:9000");
    assert_eq!(cfg.client.viewport_width, 800);
}

#[test]
fn test_optional_sections_use_defaults() {
    let file = write_config(
        r#"
[service]
name = "meet-room"

[service.http]
bind = "127.0.0.1"
port = 8080

[tokens]
secret = "s3cret"
"#,
    );

    let cfg = Config::load(file.path().to_str().unwrap()).unwrap();

    assert_eq!(cfg.tokens.ttl_secs, 3600);
    assert_eq!(cfg.client.action_url, "http://127.0.0.1:8080");
    assert_eq!(cfg.client.viewport_width, 1280);
}

#[test]
fn test_missing_tokens_section_fails() {
    let file = write_config(
        r#"
[service]
name = "meet-room"

[service.http]
bind = "127.0.0.1"
port = 8080
"#,
    );

    assert!(Config::load(file.path().to_str().unwrap()).is_err());
}

#[test]
fn test_shipped_config_loads() {
    let cfg = Config::load(concat!(env!("CARGO_MANIFEST_DIR"), "/config/meet-room")).unwrap();

    assert_eq!(cfg.service.name, "meet-room");
    assert!(!cfg.tokens.secret.is_empty());
}
