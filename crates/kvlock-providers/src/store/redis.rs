//! Redis key-value store provider
//!
//! Networked store implementation using Redis as the arbitration point for
//! locks shared by many processes and machines.
//!
//! ## Features
//!
//! - `SET key value NX EX secs` for atomic conditional acquisition
//! - Server-side Lua check-and-delete for atomic release (`EVALSHA`, with
//!   automatic `EVAL` fallback when the script is not cached)
//! - Lazily established, auto-reconnecting connection shared by clones
//!
//! ## Example
//!
//! ```ignore
//! use kvlock_providers::store::RedisKeyValueStore;
//!
//! let store = RedisKeyValueStore::new("redis://localhost:6379")?;
//! // Or with host/port
//! let store = RedisKeyValueStore::with_host_port("localhost", 6379)?;
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use kvlock_domain::constants::RELEASE_LOCK_SCRIPT;
use kvlock_domain::error::{Error, Result};
use kvlock_domain::ports::providers::KeyValueStore;
use kvlock_domain::value_objects::KeyTtl;
use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use redis::{AsyncCommands, Client, RedisError, Script};
use std::sync::{Arc, LazyLock};
use std::time::Duration;
use tokio::sync::OnceCell;

/// Release script, hashed once per process
static RELEASE_SCRIPT: LazyLock<Script> = LazyLock::new(|| Script::new(RELEASE_LOCK_SCRIPT));

fn command_error(command: &str, e: RedisError) -> Error {
    Error::Store {
        message: format!("Redis {command} failed: {e}"),
        source: Some(Box::new(e)),
    }
}

/// Host part of a connection URL with scheme and credentials stripped
fn display_address(connection_string: &str) -> String {
    let without_scheme = connection_string
        .split_once("://")
        .map_or(connection_string, |(_, rest)| rest);
    let host = without_scheme
        .rsplit_once('@')
        .map_or(without_scheme, |(_, host)| host);
    host.trim_end_matches('/').to_string()
}

/// Connection establishment and command timing
///
/// Every command's latency is bounded by these values, including on an
/// unreachable server: a failed connect costs at most
/// `(1 + connection_retries)` connect timeouts plus the backoff between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RedisConnectionSettings {
    /// Timeout for a single connect attempt
    pub connection_timeout: Duration,
    /// Timeout for a single command reply
    pub response_timeout: Duration,
    /// Reconnect attempts after the first failed connect
    pub connection_retries: usize,
}

impl Default for RedisConnectionSettings {
    fn default() -> Self {
        Self {
            connection_timeout: Duration::from_secs(1),
            response_timeout: Duration::from_secs(1),
            connection_retries: 1,
        }
    }
}

impl RedisConnectionSettings {
    fn manager_config(&self) -> ConnectionManagerConfig {
        ConnectionManagerConfig::new()
            .set_connection_timeout(Some(self.connection_timeout))
            .set_response_timeout(Some(self.response_timeout))
            .set_number_of_retries(self.connection_retries)
    }
}

/// Redis key-value store provider
///
/// The connection is opened on first use and then shared by every clone.
#[derive(Clone)]
pub struct RedisKeyValueStore {
    client: Client,
    address: String,
    settings: RedisConnectionSettings,
    connection: Arc<OnceCell<ConnectionManager>>,
}

impl RedisKeyValueStore {
    /// Create a new Redis store with connection string
    ///
    /// # Arguments
    ///
    /// * `connection_string` - Redis connection URL (e.g., "redis://localhost:6379")
    ///
    /// No network I/O happens here; an unreachable server surfaces on the
    /// first command.
    pub fn new(connection_string: &str) -> Result<Self> {
        Self::with_settings(connection_string, RedisConnectionSettings::default())
    }

    /// Create a new Redis store with explicit connection timing
    pub fn with_settings(connection_string: &str, settings: RedisConnectionSettings) -> Result<Self> {
        let client = Client::open(connection_string).map_err(|e| Error::Configuration {
            message: format!("Failed to create Redis client: {e}"),
            source: Some(Box::new(e)),
        })?;

        Ok(Self {
            client,
            address: display_address(connection_string),
            settings,
            connection: Arc::new(OnceCell::new()),
        })
    }

    /// Create a new Redis store with host and port
    pub fn with_host_port(host: &str, port: u16) -> Result<Self> {
        Self::new(&format!("redis://{host}:{port}"))
    }

    /// Get the shared connection, connecting on first use
    async fn get_connection(&self) -> Result<ConnectionManager> {
        self.connection
            .get_or_try_init(|| {
                self.client
                    .get_connection_manager_with_config(self.settings.manager_config())
            })
            .await
            .cloned()
            .map_err(|e| Error::Store {
                message: format!("Failed to get Redis connection: {e}"),
                source: Some(Box::new(e)),
            })
    }

    /// Verify the server answers `PING`
    pub async fn ping(&self) -> Result<()> {
        let mut conn = self.get_connection().await?;
        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| command_error("PING", e))?;
        Ok(())
    }

    /// Get the Redis server address description, without credentials
    pub fn server_address(&self) -> &str {
        &self.address
    }

    /// Connection timing in effect
    pub fn settings(&self) -> &RedisConnectionSettings {
        &self.settings
    }
}

#[async_trait]
impl KeyValueStore for RedisKeyValueStore {
    async fn set_if_absent(&self, key: &str, value: &str, ttl_secs: u64) -> Result<bool> {
        let mut conn = self.get_connection().await?;

        // SET … NX returns "OK" when the key was set, nil otherwise.
        let reply: Option<String> = redis::cmd("SET")
            .arg(key)
            .arg(value)
            .arg("NX")
            .arg("EX")
            .arg(ttl_secs)
            .query_async(&mut conn)
            .await
            .map_err(|e| command_error("SET NX", e))?;

        Ok(reply.is_some())
    }

    async fn compare_and_delete(&self, key: &str, expected: &str) -> Result<bool> {
        let mut conn = self.get_connection().await?;

        let deleted: i64 = RELEASE_SCRIPT
            .key(key)
            .arg(expected)
            .invoke_async(&mut conn)
            .await
            .map_err(|e| command_error("release script", e))?;

        Ok(deleted == 1)
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.get_connection().await?;

        conn.get(key).await.map_err(|e| command_error("GET", e))
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let mut conn = self.get_connection().await?;

        let deleted: redis::RedisResult<i64> = conn.del(key).await;
        match deleted {
            Ok(count) => Ok(count > 0),
            Err(e) => Err(command_error("DEL", e)),
        }
    }

    async fn delete_many(&self, keys: &[String]) -> Result<u64> {
        // DEL with no arguments is a syntax error
        if keys.is_empty() {
            return Ok(0);
        }

        let mut conn = self.get_connection().await?;

        let deleted: u64 = conn
            .del(keys.to_vec())
            .await
            .map_err(|e| command_error("DEL", e))?;
        Ok(deleted)
    }

    async fn expire(&self, key: &str, ttl_secs: u64) -> Result<bool> {
        let mut conn = self.get_connection().await?;

        let seconds = i64::try_from(ttl_secs).unwrap_or(i64::MAX);
        let updated: bool = conn
            .expire(key, seconds)
            .await
            .map_err(|e| command_error("EXPIRE", e))?;
        Ok(updated)
    }

    async fn expire_at(&self, key: &str, at: DateTime<Utc>) -> Result<bool> {
        let mut conn = self.get_connection().await?;

        let updated: bool = conn
            .expire_at(key, at.timestamp())
            .await
            .map_err(|e| command_error("EXPIREAT", e))?;
        Ok(updated)
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        let mut conn = self.get_connection().await?;

        let exists: redis::RedisResult<i64> = conn.exists(key).await;
        match exists {
            Ok(count) => Ok(count > 0),
            Err(e) => Err(command_error("EXISTS", e)),
        }
    }

    async fn ttl(&self, key: &str) -> Result<KeyTtl> {
        let mut conn = self.get_connection().await?;

        let reply: i64 = conn.ttl(key).await.map_err(|e| command_error("TTL", e))?;
        Ok(KeyTtl::from_reply(reply))
    }

    fn provider_name(&self) -> &str {
        "redis"
    }
}

impl std::fmt::Debug for RedisKeyValueStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisKeyValueStore")
            .field("server", &self.server_address())
            .field("connected", &self.connection.initialized())
            .finish()
    }
}
