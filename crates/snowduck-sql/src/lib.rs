//! The SQL dialect translator (L3): type mapping, function rewrites, and
//! the MERGE decomposition, plus the parameter binding validator (L4.4).
//!
//! Rewrites are applied in the fixed order the component design calls
//! for: type mapping happens where DDL column definitions are built
//! (see [`types::map_type`]); function rewrites ([`rewrite_functions`])
//! and the MERGE rewrite ([`parse_merge`]) both run over statement text
//! before bind-validation, which lives in [`bindings`].

mod bindings;
mod functions;
mod merge;
mod sqltext;
mod types;

pub use bindings::{validate_binding, BindingKind};
pub use functions::rewrite_functions;
pub use merge::{parse_merge, MergePlan};
pub use types::map_type;
