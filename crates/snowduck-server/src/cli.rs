use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use snowduck_common::EmulatorConfig;

#[derive(Parser, Debug)]
#[command(name = "snowduck-server", about = "Snowflake-wire-compatible emulator fronting an embedded engine")]
pub struct Cli {
    /// Address the driver/REST listener binds to.
    #[arg(long, env = "SNOWDUCK_LISTEN_ADDR", default_value = "127.0.0.1:8081")]
    pub listen_addr: String,

    /// Root directory for internal stage payload storage.
    #[arg(long, env = "SNOWDUCK_STAGE_DIR", default_value = "./stages")]
    pub stage_dir: PathBuf,

    /// Path to the embedded engine's database file. Omit for in-memory.
    #[arg(long, env = "SNOWDUCK_DB_FILE")]
    pub db_file: Option<PathBuf>,

    /// Session token time-to-live, in seconds.
    #[arg(long, env = "SNOWDUCK_SESSION_TTL_SECS", default_value_t = 3600)]
    pub session_ttl_secs: u64,

    /// Statement handle time-to-live, in seconds.
    #[arg(long, env = "SNOWDUCK_STATEMENT_TTL_SECS", default_value_t = 3600)]
    pub statement_ttl_secs: u64,

    /// Number of pooled read connections against the embedded engine.
    #[arg(long, env = "SNOWDUCK_READER_POOL_SIZE", default_value_t = 4)]
    pub reader_pool_size: usize,

    /// Emit structured JSON logs instead of the human-readable formatter.
    #[arg(long, env = "SNOWDUCK_LOG_JSON", default_value_t = false)]
    pub log_json: bool,
}

impl Cli {
    pub fn into_config(self) -> EmulatorConfig {
        EmulatorConfig {
            stage_dir: self.stage_dir,
            session_ttl: Duration::from_secs(self.session_ttl_secs),
            statement_ttl: Duration::from_secs(self.statement_ttl_secs),
            listen_addr: self.listen_addr,
            db_file: self.db_file,
            reader_pool_size: self.reader_pool_size,
        }
    }
}
