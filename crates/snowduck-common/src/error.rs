use std::fmt;

/// The error taxonomy from which every surfaced failure in the emulator is
/// drawn. Each kind has a fixed mapping to a wire-level status: a driver
/// response code, a REST v2 status code, and an HTTP status for the
/// catalog CRUD surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    AlreadyExists,
    NotFound,
    ValidationFailed,
    AuthenticationError,
    CompilationError,
    ExecutionError,
    Cancelled,
}

impl ErrorKind {
    /// The code surfaced on the REST statements v2 response.
    pub fn rest_code(self) -> &'static str {
        match self {
            ErrorKind::AlreadyExists => "ValidationFailed",
            ErrorKind::NotFound => "ObjectNotFound",
            ErrorKind::ValidationFailed => "ValidationFailed",
            ErrorKind::AuthenticationError => "AuthenticationFailed",
            ErrorKind::CompilationError => "CompilationError",
            ErrorKind::ExecutionError => "ExecutionError",
            ErrorKind::Cancelled => "Cancelled",
        }
    }

    /// The conventional HTTP status for the catalog CRUD surface
    /// (`/api/v2/databases`, `/schemas`, `/tables`, `/warehouses`).
    pub fn http_status(self) -> u16 {
        match self {
            ErrorKind::AlreadyExists => 409,
            ErrorKind::NotFound => 404,
            ErrorKind::ValidationFailed => 400,
            ErrorKind::AuthenticationError => 401,
            ErrorKind::CompilationError => 400,
            ErrorKind::ExecutionError => 400,
            ErrorKind::Cancelled => 400,
        }
    }
}

/// The error type threaded through every layer of the core.
///
/// `source` carries the underlying cause (an engine error message, most
/// often) separately from `message`, the context the layer that raised the
/// error attached, so callers can decide how much detail to surface.
#[derive(Debug)]
pub struct SdError {
    kind: ErrorKind,
    message: String,
    source: Option<String>,
}

impl SdError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        SdError {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn already_exists(what: impl Into<String>) -> Self {
        Self::new(ErrorKind::AlreadyExists, what)
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, what)
    }

    pub fn validation(what: impl Into<String>) -> Self {
        Self::new(ErrorKind::ValidationFailed, what)
    }

    pub fn auth(what: impl Into<String>) -> Self {
        Self::new(ErrorKind::AuthenticationError, what)
    }

    pub fn compilation(what: impl Into<String>) -> Self {
        Self::new(ErrorKind::CompilationError, what)
    }

    pub fn execution(what: impl Into<String>) -> Self {
        Self::new(ErrorKind::ExecutionError, what)
    }

    pub fn cancelled() -> Self {
        Self::new(ErrorKind::Cancelled, "statement cancelled")
    }
}

impl fmt::Display for SdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }
        Ok(())
    }
}

impl std::error::Error for SdError {}

impl From<snowduck_cancel::CancelledError> for SdError {
    fn from(_: snowduck_cancel::CancelledError) -> Self {
        SdError::cancelled()
    }
}

pub type SdResult<T> = Result<T, SdError>;

/// Translates a duplicate-key or uniqueness-constraint message from the
/// embedded engine into [`ErrorKind::AlreadyExists`]; everything else
/// becomes [`ErrorKind::ExecutionError`].
///
/// This is the one place that should ever inspect an engine error message
/// by substring — centralizing it means there is exactly one spot to
/// update if the engine's wording changes across versions.
pub fn translate_engine_error(context: &str, message: impl AsRef<str>) -> SdError {
    let message = message.as_ref();
    if message.contains("UNIQUE") || message.contains("Constraint Error") {
        SdError::already_exists(format!("{context}: {message}"))
    } else {
        SdError::execution(context.to_string()).with_source(message.to_string())
    }
}
