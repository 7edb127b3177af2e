//! Runs the built `cityweather` binary. Paths that reach the network point the
//! config at a local mock server.

use std::path::PathBuf;
use std::process::{Command, Output};

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_home(test: &str) -> PathBuf {
    std::env::temp_dir().join(format!("cityweather-cli-{}-{test}", std::process::id()))
}

fn run_cli(args: &[&str], config_home: &PathBuf) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cityweather"))
        .args(args)
        .env("XDG_CONFIG_HOME", config_home)
        .env_remove("RUST_LOG")
        .output()
        .expect("run cityweather")
}

#[test]
fn help_describes_the_tool() {
    let home = config_home("help");
    let output = run_cli(&["--help"], &home);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Search a city"));
    for command in ["search", "show", "suggest", "configure"] {
        assert!(stdout.contains(command), "missing command {command}");
    }
}

#[test]
fn short_suggest_query_prints_empty_json_list() {
    let home = config_home("suggest-json");
    let output = run_cli(&["suggest", "L", "--json"], &home);

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "[]");
}

#[test]
fn short_suggest_query_explains_why_nothing_is_listed() {
    let home = config_home("suggest-text");
    let output = run_cli(&["suggest", "L"], &home);

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Type at least 2 characters"));
}

#[test]
fn show_with_short_query_fails_with_one_message() {
    let home = config_home("show");
    let output = run_cli(&["show", "L"], &home);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("Type at least 2 characters").count(), 1);
}

#[test]
fn configure_reset_writes_default_file() {
    let home = config_home("configure");
    let output = run_cli(&["configure", "--reset"], &home);

    assert!(output.status.success());
    let written = home.join("cityweather").join("config.toml");
    let contents = std::fs::read_to_string(&written).expect("config written");
    assert!(contents.contains("debounce_ms = 300"));
    assert!(contents.contains("https://api.open-meteo.com/v1/forecast"));

    let _ = std::fs::remove_dir_all(&home);
}

#[test]
fn invalid_config_is_reported() {
    let home = config_home("invalid");
    let dir = home.join("cityweather");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join("config.toml"),
        "[endpoints]\nforecast_url = \"not-a-url\"\n",
    )
    .unwrap();

    let output = run_cli(&["suggest", "London"], &home);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to parse config file"));

    let _ = std::fs::remove_dir_all(&home);
}

async fn mock_open_meteo(forecast: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{
                "id": 2643743,
                "name": "London",
                "latitude": 51.50853,
                "longitude": -0.12574,
                "country_code": "GB",
                "country": "United Kingdom"
            }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(forecast)
        .mount(&server)
        .await;

    server
}

fn point_config_at(home: &PathBuf, server: &MockServer) {
    let dir = home.join("cityweather");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join("config.toml"),
        format!(
            "[endpoints]\ngeocoding_url = \"{uri}/v1/search\"\nforecast_url = \"{uri}/v1/forecast\"\n",
            uri = server.uri()
        ),
    )
    .unwrap();
}

async fn run_cli_async(args: &'static [&'static str], home: PathBuf) -> Output {
    tokio::task::spawn_blocking(move || run_cli(args, &home))
        .await
        .unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn show_failure_prints_a_single_banner() {
    let server = mock_open_meteo(ResponseTemplate::new(400).set_body_json(json!({
        "error": true,
        "reason": "Latitude must be in range"
    })))
    .await;
    let home = config_home("show-failure");
    point_config_at(&home, &server);

    let cases: [&'static [&'static str]; 2] = [&["show", "London"], &["show", "London", "--json"]];
    for args in cases {
        let output = run_cli_async(args, home.clone()).await;

        assert!(!output.status.success());
        assert!(output.stdout.is_empty());

        let stderr = String::from_utf8_lossy(&output.stderr);
        assert_eq!(stderr.matches("Latitude must be in range").count(), 1, "{stderr}");
        let banners: Vec<&str> = stderr.lines().filter(|l| l.starts_with("error:")).collect();
        assert_eq!(banners, ["error: Latitude must be in range"]);
    }

    let _ = std::fs::remove_dir_all(&home);
}

#[tokio::test(flavor = "multi_thread")]
async fn show_renders_panel_and_five_day_strip() {
    let server = mock_open_meteo(ResponseTemplate::new(200).set_body_json(json!({
        "current": {
            "temperature_2m": 15.2,
            "relative_humidity_2m": 81,
            "apparent_temperature": 13.9,
            "wind_speed_10m": 11.5,
            "weather_code": 3
        },
        "daily": {
            "time": ["2024-01-01", "2024-01-02", "2024-01-03", "2024-01-04", "2024-01-05", "2024-01-06"],
            "temperature_2m_max": [15.9, 9.1, 8.4, 7.0, 2.2, 5.5],
            "weather_code": [1, 2, 3, 61, 71, 0]
        }
    })))
    .await;
    let home = config_home("show-ready");
    point_config_at(&home, &server);

    let output = run_cli_async(&["show", "London"], home.clone()).await;

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("London, GB"));
    assert!(stdout.contains("15°  Overcast"));
    assert!(stdout.contains("5-Day Forecast"));
    assert_eq!(stdout.lines().filter(|l| l.ends_with("@2x.png")).count(), 5);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Loading weather for London, United Kingdom..."));
    assert!(!stderr.contains("error:"));

    let _ = std::fs::remove_dir_all(&home);
}
