use crate::Config;
use crate::tests::{EnvGuard, setup_config_dir, with_secrets};

use googletest::assert_that;
use googletest::prelude::{anything, contains_substring, err};
use serial_test::serial;

// =========================================================================
// Edge Cases
// =========================================================================

#[test]
#[serial]
fn given_malformed_toml_when_load_then_error_mentions_file() {
    // Given
    let (temp, _guard) = setup_config_dir();
    std::fs::write(temp.path().join("config.toml"), "this is not valid toml {{{{").unwrap();

    // When
    let result = Config::load();

    // Then
    assert_that!(result, err(anything()));
    let err_msg = format!("{}", result.unwrap_err());
    assert_that!(err_msg, contains_substring("config.toml"));
}

#[test]
#[serial]
fn given_database_path_with_traversal_when_validate_then_error() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _secrets = with_secrets();
    let _path = EnvGuard::set("ACCT_DATABASE_PATH", "../../../etc/passwd");

    // When
    let result = Config::load().unwrap().validate();

    // Then
    assert_that!(result, err(anything()));
    let err_msg = format!("{}", result.unwrap_err());
    assert_that!(err_msg, contains_substring(".."));
}

#[test]
#[serial]
fn given_absolute_media_dir_when_validate_then_error() {
    let (_temp, _guard) = setup_config_dir();
    let _secrets = with_secrets();
    let _dir = EnvGuard::set("ACCT_MEDIA_DIR", "/var/www/media");

    let result = Config::load().unwrap().validate();

    assert_that!(result, err(anything()));
    let err_msg = format!("{}", result.unwrap_err());
    assert_that!(err_msg, contains_substring("media.dir"));
}

#[test]
#[serial]
fn given_privileged_port_when_validate_then_error() {
    let (_temp, _guard) = setup_config_dir();
    let _secrets = with_secrets();
    let _port = EnvGuard::set("ACCT_SERVER_PORT", "80");

    let result = Config::load().unwrap().validate();

    assert_that!(result, err(anything()));
}

#[test]
#[serial]
fn given_zero_database_connections_when_validate_then_error() {
    let (_temp, _guard) = setup_config_dir();
    let _secrets = with_secrets();
    let _max = EnvGuard::set("ACCT_DATABASE_MAX_CONNECTIONS", "0");

    let result = Config::load().unwrap().validate();

    assert_that!(result, err(anything()));
}

#[test]
#[serial]
fn given_unparseable_port_when_load_then_default_kept() {
    let (_temp, _guard) = setup_config_dir();
    let _port = EnvGuard::set("ACCT_SERVER_PORT", "not-a-port");

    let config = Config::load().unwrap();

    assert_eq!(config.server.port, crate::DEFAULT_PORT);
}
