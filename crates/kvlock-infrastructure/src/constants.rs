//! Infrastructure layer constants
//!
//! Contains constants that are part of the infrastructure implementation.
//! Lock protocol constants are defined in `kvlock_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "kvlock.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "kvlock";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "KVLOCK";

/// Separator between nesting levels in configuration environment variables
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// NAMESPACE CONSTANTS
// ============================================================================

/// Default environment segment of every key
pub const DEFAULT_ENVIRONMENT: &str = "dev";

/// Default application segment of every key
pub const DEFAULT_APPLICATION_NAME: &str = "kvlock";

// ============================================================================
// STORE CONSTANTS
// ============================================================================

/// Default Redis connection URL
pub const DEFAULT_REDIS_URI: &str = "redis://127.0.0.1:6379";

/// Default timeout for one Redis connect attempt in milliseconds
pub const DEFAULT_REDIS_CONNECTION_TIMEOUT_MS: u64 = 1_000;

/// Default timeout for one Redis command reply in milliseconds
pub const DEFAULT_REDIS_RESPONSE_TIMEOUT_MS: u64 = 1_000;

/// Default reconnect attempts after a failed Redis connect
pub const DEFAULT_REDIS_CONNECTION_RETRIES: usize = 1;

// ============================================================================
// LOCK CONSTANTS
// ============================================================================

/// Default lock TTL in milliseconds
pub const DEFAULT_LOCK_TTL_MS: u64 = 30_000;

/// Default acquisition timeout in milliseconds
pub const DEFAULT_LOCK_TIMEOUT_MS: u64 = 5_000;

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the configured log filter
pub const LOG_FILTER_ENV: &str = "KVLOCK_LOG";

/// Maximum number of rotated log files to keep
pub const LOG_MAX_FILES: usize = 7;
