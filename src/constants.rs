//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Default REST backend base URL
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/api";

/// Environment variable overriding the backend base URL
pub const ENV_API_BASE_URL: &str = "MARQUEE_API_BASE_URL";

/// Environment variable overriding the log level
pub const ENV_LOG_LEVEL: &str = "MARQUEE_LOG_LEVEL";

/// Environment variable overriding the data directory
pub const ENV_HOME: &str = "MARQUEE_HOME";

/// Data directory name under the user's home
pub const DATA_DIR_NAME: &str = ".marquee";

/// Config file name inside the data directory
pub const CONFIG_FILE: &str = "config.yaml";

/// Persisted client state file name inside the data directory
pub const STATE_FILE: &str = "state.yaml";

/// Log file name inside the data directory
pub const LOG_FILE: &str = "marquee.log";

/// Message used when the server gives no usable error body
pub const DEFAULT_ERROR_MESSAGE: &str = "Something went wrong";

/// Minimum password length accepted by the register and profile forms
pub const MIN_PASSWORD_LEN: usize = 6;

/// Earliest release year the admin form accepts
pub const MIN_MOVIE_YEAR: i32 = 1900;

/// Genres the admin form can assign
pub const AVAILABLE_GENRES: [&str; 15] = [
    "Action",
    "Adventure",
    "Animation",
    "Comedy",
    "Crime",
    "Documentary",
    "Drama",
    "Family",
    "Fantasy",
    "Horror",
    "Mystery",
    "Romance",
    "Sci-Fi",
    "Thriller",
    "Western",
];

/// Application name
pub const APP_NAME: &str = "Marquee";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
