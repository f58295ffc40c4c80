//! Session and statement lifecycle (L5): everything above the query
//! executor that depends on "who is asking" and "what have they already
//! run" — login/token issuance, cursor tracking, and statement handles.

mod session;
mod statement;
mod token;

pub use session::{default_auth_policy, Session, SessionManager, SessionState};
pub use statement::{StatementHandle, StatementManager, StatementStatus};
pub use token::generate_token;
