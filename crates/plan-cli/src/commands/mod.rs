//! Command implementations for plan-cli

pub mod projects;
pub mod resolve;
pub mod validate;

pub use projects::run_projects;
pub use resolve::run_resolve;
pub use validate::run_validate;
