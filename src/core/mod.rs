// ============================================================================
// equatable-collections - Core Module
// Constants, policy function types and the error taxonomy
// ============================================================================

pub mod constants;
pub mod error;
pub mod types;

// Re-export commonly used items
pub use constants::*;
pub use error::{CollectionError, Result};
pub use types::{default_equals, default_hash, hash_state, EqualsFn, HashFn};
