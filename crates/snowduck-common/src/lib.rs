pub mod config;
pub mod error;
pub mod ident;
pub mod logging;
pub mod stage;
pub mod time;

pub use config::EmulatorConfig;
pub use error::{ErrorKind, SdError, SdResult};
