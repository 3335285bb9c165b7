//! Application-wide constants
//!
//! Single source of truth for magic numbers and configuration defaults.

/// Network port configuration
pub mod ports {
    /// Default port for the HTTP API
    pub const SERVER: u16 = 3000;
}

/// Server host configuration
pub mod hosts {
    /// Default host for local server binding
    pub const LOCAL: &str = "127.0.0.1";
}

/// Data storage paths
pub mod paths {
    /// Directory under the platform config dir
    pub const APP_DIR: &str = "component-builder";
    /// Configuration file inside the data directory
    pub const CONFIG_FILE: &str = "config.json";
}

/// Environment variables that override the config file
pub mod env {
    pub const API_KEY: &str = "COHERE_API_KEY";
    pub const HOST: &str = "BUILDER_HOST";
    pub const PORT: &str = "BUILDER_PORT";
    pub const CONFIG_DIR: &str = "BUILDER_CONFIG_DIR";
}

/// Fixed response text
pub mod messages {
    pub const PING: &str = "CohereBuilder is running";
    pub const INVALID_REQUEST: &str = "Invalid request";
    pub const GENERATION_FAILED: &str = "Failed to generate component";
    pub const CHAT_FAILED: &str = "Error generating component";
}

/// Request limits
pub mod limits {
    /// Largest accepted request body
    pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;
}
