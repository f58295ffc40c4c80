//! Response codes surfaced on the REST statements v2 and driver-protocol
//! envelopes. These are string codes, not HTTP statuses — the catalog CRUD
//! surface uses HTTP statuses directly via [`snowduck_common::ErrorKind::http_status`].

use snowduck_common::ErrorKind;

pub const SUCCESS: &str = "090001";

pub fn code_for(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::AlreadyExists => "000607",
        ErrorKind::NotFound => "000606",
        ErrorKind::ValidationFailed => "000604",
        ErrorKind::AuthenticationError => "390100",
        ErrorKind::CompilationError => "000605",
        ErrorKind::ExecutionError => "000609",
        ErrorKind::Cancelled => "000604",
    }
}
