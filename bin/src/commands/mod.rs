//! CLI command implementations.

pub(crate) mod analyze;
pub(crate) mod plan;
pub(crate) mod quota;
