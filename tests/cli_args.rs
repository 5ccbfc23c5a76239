//! Integration tests for CLI argument handling
//!
//! Tests the --start flag, service URL validation and timeout parsing.
//! Invalid arguments must be rejected before the terminal is taken over.

use std::process::Command;

/// Helper to run the CLI with given args and capture output
fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_tripplan"))
        .args(args)
        .env_remove("TRIPPLAN_URL")
        .output()
        .expect("Failed to execute tripplan")
}

#[test]
fn test_help_flag_exits_successfully() {
    let output = run_cli(&["--help"]);
    assert!(
        output.status.success(),
        "Expected --help to exit successfully"
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("tripplan"), "Help should mention tripplan");
    assert!(stdout.contains("--start"), "Help should mention --start flag");
    assert!(stdout.contains("--url"), "Help should mention --url flag");
}

#[test]
fn test_invalid_vacation_type_prints_error_and_exits() {
    let output = run_cli(&["--start", "moon"]);
    assert!(
        !output.status.success(),
        "Expected invalid vacation type to fail"
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid vacation type"),
        "Should print error message about invalid vacation type: {}",
        stderr
    );
}

#[test]
fn test_invalid_url_prints_error_and_exits() {
    let output = run_cli(&["--url", "localhost-without-scheme"]);
    assert!(!output.status.success(), "Expected invalid URL to fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("localhost-without-scheme"),
        "Should echo the rejected URL: {}",
        stderr
    );
}

#[test]
fn test_zero_timeout_is_rejected() {
    let output = run_cli(&["--timeout-secs", "0"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("timeout"), "stderr: {}", stderr);
}

#[test]
fn test_start_with_ski_is_valid() {
    // With --help, it should succeed regardless of other flags
    let output = run_cli(&["--start", "ski", "--help"]);
    assert!(output.status.success());
}

#[cfg(test)]
mod unit_tests {
    //! Unit tests for CLI parsing that don't require running the binary

    use std::path::PathBuf;

    use clap::Parser;
    use tripplan::cli::{parse_vacation_type_arg, Cli, CliError, StartupConfig};
    use tripplan::data::VacationType;

    #[test]
    fn test_cli_no_args_returns_none_start() {
        let cli = Cli::parse_from(["tripplan"]);
        assert!(cli.start.is_none());
        assert!(!cli.show_errors);
        assert!(!cli.unmuted);
    }

    #[test]
    fn test_cli_start_flag_without_value() {
        let cli = Cli::parse_from(["tripplan", "--start"]);
        assert_eq!(cli.start, Some(None));
    }

    #[test]
    fn test_cli_start_flag_with_city() {
        let cli = Cli::parse_from(["tripplan", "--start", "city"]);
        assert_eq!(cli.start.as_ref().unwrap().as_deref(), Some("city"));
    }

    #[test]
    fn test_parse_vacation_type_arg_accepts_skiing() {
        assert_eq!(parse_vacation_type_arg("skiing").unwrap(), VacationType::Ski);
    }

    #[test]
    fn test_parse_vacation_type_arg_invalid_returns_error() {
        assert!(matches!(
            parse_vacation_type_arg("desert"),
            Err(CliError::InvalidVacationType(_))
        ));
    }

    #[test]
    fn test_startup_config_from_audio_flags() {
        let cli = Cli::parse_from([
            "tripplan",
            "--player",
            "mpv --loop=inf --no-video",
            "--landing-track",
            "/tmp/landing.mp3",
            "--loading-track",
            "/tmp/loading.mp3",
            "--log-file",
            "/tmp/tripplan-test.log",
        ]);
        let config = StartupConfig::from_cli(&cli).unwrap();

        assert_eq!(config.player.as_deref(), Some("mpv --loop=inf --no-video"));
        assert_eq!(config.tracks.landing, Some(PathBuf::from("/tmp/landing.mp3")));
        assert_eq!(config.tracks.loading, Some(PathBuf::from("/tmp/loading.mp3")));
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/tripplan-test.log")));
        assert!(config.muted, "music starts muted unless --unmuted is given");
    }
}
