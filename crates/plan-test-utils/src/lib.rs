//! Shared test utilities for the taskplan workspace.
//!
//! This crate provides standardised fixtures so crate test suites do not
//! each hand-roll temporary workspaces. It is a dev-dependency only and is
//! never published.
//!
//! # Modules
//!
//! - [`documents`] - sample configuration documents
//! - [`workspace`] - [`TestWorkspace`] builder for on-disk scenarios

pub mod documents;
pub mod workspace;

pub use workspace::TestWorkspace;
