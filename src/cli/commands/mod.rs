//! Subcommand implementations.

/// Provider listing command handler.
pub mod providers;

/// Sheet translation command handler.
pub mod translate;
