//! Error types for settings loading and validation.

/// Error type for settings sources and validation.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum ConfError {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),

	#[error("Invalid value for '{key}': {message}")]
	InvalidValue { key: String, message: String },

	#[error("Invalid environment variable '{key}': {message}")]
	Env { key: String, message: String },
}
