// All scanning functionality is in frcheck-core
// This CLI acts as a thin wrapper around the core library

// CLI-specific modules
pub mod config_locator;

// Re-export core types for convenience
pub use frcheck_core::*;

// Re-export CLI utilities
pub use config_locator::{load_config, locate_config, ConfigSource};
