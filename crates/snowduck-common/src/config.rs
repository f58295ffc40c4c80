use std::path::PathBuf;
use std::time::Duration;

/// Recognized configuration for the emulator, collected from CLI flags and
/// environment variables at the server boundary and threaded down into
/// every layer that needs it.
#[derive(Debug, Clone)]
pub struct EmulatorConfig {
    /// Root directory for internal stage payload storage. Internal stage
    /// files live under `<stage_dir>/<schema-id>/<stage-name>/`.
    pub stage_dir: PathBuf,
    /// Session token time-to-live. Renewed on `Heartbeat`.
    pub session_ttl: Duration,
    /// Statement handle time-to-live, independent of session TTL.
    pub statement_ttl: Duration,
    /// Address the driver/REST listener binds to. Owned by the HTTP layer;
    /// carried here only so one config object threads through the whole
    /// process.
    pub listen_addr: String,
    /// Path to the embedded engine's database file. `None` runs the engine
    /// fully in memory.
    pub db_file: Option<PathBuf>,
    /// Number of pooled read connections the connection manager keeps open
    /// against the embedded engine.
    pub reader_pool_size: usize,
}

impl Default for EmulatorConfig {
    fn default() -> Self {
        EmulatorConfig {
            stage_dir: PathBuf::from("./stages"),
            session_ttl: Duration::from_secs(3600),
            statement_ttl: Duration::from_secs(3600),
            listen_addr: "127.0.0.1:8081".to_string(),
            db_file: None,
            reader_pool_size: 4,
        }
    }
}
