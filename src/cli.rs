//! Command-line interface parsing for the trip planner
//!
//! This module handles parsing of CLI arguments using clap: the planning
//! service location, audio setup, logging, and the --start flag for skipping
//! the landing screen.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use reqwest::Url;
use thiserror::Error;

use crate::audio::TrackFiles;
use crate::data::VacationType;
use crate::service::DEFAULT_BASE_URL;

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The specified vacation type is not recognized
    #[error("Invalid vacation type: '{0}'. Valid types: ski, beach, city")]
    InvalidVacationType(String),

    /// The service URL is not an http(s) URL
    #[error("Invalid service URL: '{0}'")]
    InvalidUrl(String),

    /// A zero timeout would fail every request
    #[error("--timeout-secs must be greater than zero")]
    ZeroTimeout,
}

/// Trip Planner - search vacation packages and browse trip itineraries
#[derive(Parser, Debug)]
#[command(name = "tripplan")]
#[command(about = "Search vacation packages and browse trip itineraries")]
#[command(version)]
pub struct Cli {
    /// Base URL of the planning service
    #[arg(long, env = "TRIPPLAN_URL", default_value = DEFAULT_BASE_URL)]
    pub url: String,

    /// Give up on a request after this many seconds (default: wait forever)
    #[arg(long, value_name = "SECONDS")]
    pub timeout_secs: Option<u64>,

    /// Show failed requests on screen instead of only logging them
    #[arg(long)]
    pub show_errors: bool,

    /// Start with background music audible
    #[arg(long)]
    pub unmuted: bool,

    /// Command used to play background music, e.g. "mpv --loop=inf --no-video"
    #[arg(long, value_name = "COMMAND")]
    pub player: Option<String>,

    /// Audio file for the landing and result screens
    #[arg(long, value_name = "PATH")]
    pub landing_track: Option<PathBuf>,

    /// Audio file for the loading screen
    #[arg(long, value_name = "PATH")]
    pub loading_track: Option<PathBuf>,

    /// Write logs to this file instead of the default data directory
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Skip the welcome screen, optionally with a vacation type preselected
    ///
    /// Examples:
    ///   tripplan --start          # Open the search form
    ///   tripplan --start ski      # Open the search form with Ski selected
    ///
    /// Valid types: ski, beach, city
    #[arg(long, value_name = "TYPE")]
    pub start: Option<Option<String>>,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone, PartialEq)]
pub struct StartupConfig {
    /// Planning service root
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Option<Duration>,
    /// Whether request failures are shown in the UI
    pub surface_errors: bool,
    /// Whether background music starts muted
    pub muted: bool,
    /// External player command line
    pub player: Option<String>,
    /// Audio files for each track
    pub tracks: TrackFiles,
    /// Log file override
    pub log_file: Option<PathBuf>,
    /// Whether to open directly on the search form
    pub skip_landing: bool,
    /// Vacation type to preselect in the form
    pub initial_vacation_type: Option<VacationType>,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            surface_errors: false,
            muted: true,
            player: None,
            tracks: TrackFiles::default(),
            log_file: None,
            skip_landing: false,
            initial_vacation_type: None,
        }
    }
}

/// Parses a vacation type argument.
///
/// # Returns
/// * `Ok(VacationType)` if the string matches a valid type
/// * `Err(CliError::InvalidVacationType)` if it doesn't
pub fn parse_vacation_type_arg(s: &str) -> Result<VacationType, CliError> {
    VacationType::from_str(s).ok_or_else(|| CliError::InvalidVacationType(s.to_string()))
}

/// Checks that a service URL is an absolute http(s) URL.
pub fn validate_url(s: &str) -> Result<String, CliError> {
    let url = Url::parse(s).map_err(|_| CliError::InvalidUrl(s.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(CliError::InvalidUrl(s.to_string()));
    }
    Ok(s.to_string())
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with appropriate settings
    /// * `Err(CliError)` if a value is invalid
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let base_url = validate_url(&cli.url)?;

        let timeout = match cli.timeout_secs {
            Some(0) => return Err(CliError::ZeroTimeout),
            Some(secs) => Some(Duration::from_secs(secs)),
            None => None,
        };

        let (skip_landing, initial_vacation_type) = match &cli.start {
            None => (false, None),
            Some(None) => (true, None),
            Some(Some(type_str)) => (true, Some(parse_vacation_type_arg(type_str)?)),
        };

        Ok(StartupConfig {
            base_url,
            timeout,
            surface_errors: cli.show_errors,
            muted: !cli.unmuted,
            player: cli.player.clone(),
            tracks: TrackFiles {
                landing: cli.landing_track.clone(),
                loading: cli.loading_track.clone(),
            },
            log_file: cli.log_file.clone(),
            skip_landing,
            initial_vacation_type,
        })
    }
}
