// ABOUTME: Integration tests for environment-driven server configuration
// ABOUTME: Tests defaults, overrides, optional AI key handling and invalid numeric values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::env;
use std::path::PathBuf;

use health_companion::config::{load_dotenv_from, Environment, LogLevel, ServerConfig};
use health_companion::constants::env_vars;
use health_companion::logging::{LogFormat, LoggingConfig};
use serial_test::serial;

const ALL_VARS: &[&str] = &[
    env_vars::HOST,
    env_vars::HTTP_PORT,
    env_vars::LOG_LEVEL,
    env_vars::LOG_FORMAT,
    env_vars::ENVIRONMENT,
    env_vars::FITNESS_LOG_PATH,
    env_vars::GEMINI_API_KEY,
    env_vars::GEMINI_MODEL,
    env_vars::GEMINI_BASE_URL,
    env_vars::DEMO_LOGIN_EMAIL,
    env_vars::DEMO_LOGIN_PASSWORD,
    env_vars::GOOGLE_CLIENT_SECRET_PATH,
    env_vars::GOOGLE_REDIRECT_URI,
    env_vars::REQUEST_TIMEOUT_SECS,
    env_vars::CORS_ALLOWED_ORIGINS,
];

fn clear_env() {
    for var in ALL_VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_defaults_when_unset() {
    clear_env();

    let config = ServerConfig::from_env().unwrap();
    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.http_port, 8506);
    assert_eq!(config.fitness_log_path, PathBuf::from("fitness_data.csv"));
    assert_eq!(config.ai.model, "gemini-2.5-flash");
    assert!(!config.ai.is_enabled());
    assert_eq!(config.demo_credentials.email, "admin@gmail.com");
    assert_eq!(config.google_oauth.redirect_uri, "http://localhost:8506");
    assert_eq!(config.request_timeout_secs, 120);
    assert_eq!(config.cors_allowed_origins, "*");
}

#[test]
#[serial]
fn test_overrides_from_environment() {
    clear_env();
    env::set_var(env_vars::HTTP_PORT, "9000");
    env::set_var(env_vars::FITNESS_LOG_PATH, "/var/lib/companion/log.csv");
    env::set_var(env_vars::GEMINI_API_KEY, "test-key");
    env::set_var(env_vars::GEMINI_MODEL, "gemini-2.5-pro");
    env::set_var(env_vars::DEMO_LOGIN_EMAIL, "coach@example.com");
    env::set_var(env_vars::ENVIRONMENT, "production");

    let config = ServerConfig::from_env().unwrap();
    assert_eq!(config.http_port, 9000);
    assert_eq!(
        config.fitness_log_path,
        PathBuf::from("/var/lib/companion/log.csv")
    );
    assert!(config.ai.is_enabled());
    assert_eq!(config.ai.model, "gemini-2.5-pro");
    assert_eq!(config.demo_credentials.email, "coach@example.com");
    assert_eq!(config.environment, Environment::Production);
    assert!(!config.summary().contains("test-key"));

    clear_env();
}

#[test]
#[serial]
fn test_blank_api_key_is_treated_as_missing() {
    clear_env();
    env::set_var(env_vars::GEMINI_API_KEY, "  ");

    let config = ServerConfig::from_env().unwrap();
    assert!(config.ai.gemini_api_key.is_none());

    clear_env();
}

#[test]
#[serial]
fn test_invalid_port_is_an_error() {
    clear_env();
    env::set_var(env_vars::HTTP_PORT, "eighty");

    let error = ServerConfig::from_env().unwrap_err();
    assert!(error.to_string().contains("HTTP_PORT"));

    clear_env();
}

#[test]
#[serial]
fn test_env_file_drives_logging_and_server_config() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".env");
    std::fs::write(
        &path,
        "LOG_LEVEL=debug\nLOG_FORMAT=json\nENVIRONMENT=production\nHTTP_PORT=9100\n",
    )
    .unwrap();

    load_dotenv_from(&path).unwrap();

    let logging = LoggingConfig::from_env();
    assert_eq!(logging.level, LogLevel::Debug);
    assert_eq!(logging.format, LogFormat::Json);
    assert_eq!(logging.environment, "production");

    let config = ServerConfig::from_env().unwrap();
    assert_eq!(config.log_level, logging.level);
    assert_eq!(config.http_port, 9100);
    assert!(config.summary().contains("Log Level: debug"));

    clear_env();
}

#[test]
#[serial]
fn test_missing_env_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load_dotenv_from(&dir.path().join("absent.env")).is_err());
}
