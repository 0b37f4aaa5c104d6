//! Domain layer constants
//!
//! Constants that define the lock protocol itself. Deployment defaults
//! (connection URIs, config file names) live in `kvlock_infrastructure::constants`.

// ============================================================================
// LOCK PROTOCOL CONSTANTS
// ============================================================================

/// Fixed sleep between acquisition attempts while spin-waiting (milliseconds)
pub const LOCK_RETRY_INTERVAL_MS: u64 = 50;

/// Upper bound accepted for a spin-wait timeout (milliseconds)
pub const LOCK_MAX_WAIT_MS: u64 = 60_000;

/// Smallest TTL that survives conversion to whole store seconds (milliseconds)
pub const LOCK_MIN_TTL_MS: u64 = 1_000;

/// Atomic check-and-delete executed by the store on release.
///
/// `KEYS[1]` is the lock key and `ARGV[1]` the token presented by the caller.
/// Returns the number of deleted keys (1) on a match and 0 otherwise.
pub const RELEASE_LOCK_SCRIPT: &str = r#"
if redis.call("get", KEYS[1]) == ARGV[1] then
    return redis.call("del", KEYS[1])
else
    return 0
end
"#;

// ============================================================================
// KEY NAMESPACE CONSTANTS
// ============================================================================

/// Separator between namespace segments
pub const KEY_SEPARATOR: &str = ":";

/// `TTL` reply for a key that exists without an expiry
pub const TTL_PERSISTENT: i64 = -1;

/// `TTL` reply for a key that does not exist
pub const TTL_MISSING: i64 = -2;
