// ============================================================================
// equatable-collections - Equality Policies
// How keys, values and elements are compared and hashed
// ============================================================================
//
// Every collection takes its notion of "equal" from an EqualityComparer.
// The default wraps the type's own Eq + Hash; custom policies come from
// function pointers or Comparer objects. Collection equality additionally
// requires both sides to use the same policy, so equal collections always
// hash equal.
// ============================================================================

mod comparer;
mod ignore_case;

pub use comparer::{Comparer, EqualityComparer};
pub use ignore_case::IgnoreAsciiCase;
