// ============================================================================
// equatable-collections - Equality Comparers
// Pluggable equality + hash policies threaded through the collections
// ============================================================================

use std::any::{type_name, TypeId};
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use crate::core::types::{default_equals, default_hash, EqualsFn, HashFn};

// =============================================================================
// COMPARER TRAIT
// =============================================================================

/// A custom equality and hash strategy for `T`.
///
/// Implementations must satisfy two laws, which every collection in this
/// crate relies on:
///
/// 1. `equals` is an equivalence relation (reflexive, symmetric, transitive).
/// 2. `equals(a, b)` implies `hash(a) == hash(b)`.
///
/// # Example
///
/// ```
/// use equatable_collections::{Comparer, EqualityComparer, EquatableSet};
///
/// /// Compares numbers by their absolute value.
/// struct Magnitude;
///
/// impl Comparer<i32> for Magnitude {
///     fn equals(&self, a: &i32, b: &i32) -> bool {
///         a.unsigned_abs() == b.unsigned_abs()
///     }
///
///     fn hash(&self, value: &i32) -> u64 {
///         u64::from(value.unsigned_abs())
///     }
/// }
///
/// let set = EquatableSet::from_iter_with([1, -1, 2], EqualityComparer::shared(Magnitude));
/// assert_eq!(set.len(), 2);
/// assert!(set.contains(&-2));
/// ```
pub trait Comparer<T>: Send + Sync {
    /// Whether `a` and `b` are considered the same.
    fn equals(&self, a: &T, b: &T) -> bool;

    /// Hash code of `value`, consistent with [`equals`](Comparer::equals).
    fn hash(&self, value: &T) -> u64;
}

// =============================================================================
// EQUALITY COMPARER
// =============================================================================

/// An equality and hash policy value.
///
/// Cheap to clone and safe to share between threads. Collections hold one per
/// compared role (map keys, map values, set elements) and use it for every
/// lookup, equality check and hash.
///
/// Two collections only compare equal when their policies are the
/// [`same_policy`](EqualityComparer::same_policy); otherwise equal-looking
/// contents could hash differently.
pub struct EqualityComparer<T> {
    policy: Policy<T>,
}

enum Policy<T> {
    /// `T`'s own `Eq + Hash`, captured when the comparer was built.
    Default {
        equals: EqualsFn<T>,
        hash: HashFn<T>,
    },
    /// Caller-supplied function pointers.
    Fns {
        equals: EqualsFn<T>,
        hash: HashFn<T>,
    },
    /// Caller-supplied comparer object.
    Shared {
        comparer: Arc<dyn Comparer<T>>,
        type_id: TypeId,
        stateless: bool,
        name: &'static str,
    },
}

impl<T: Eq + Hash> EqualityComparer<T> {
    /// The default policy: `T`'s own `Eq` and `Hash`.
    pub const fn new() -> Self {
        Self {
            policy: Policy::Default {
                equals: default_equals::<T>,
                hash: default_hash::<T>,
            },
        }
    }
}

impl<T> EqualityComparer<T> {
    /// A policy made of two plain functions.
    ///
    /// Two function policies are the same policy when both pointers are
    /// identical. Addresses of generic functions are not guaranteed to be
    /// unique: `default_equals::<T>` instantiated in two crates may compare
    /// unequal. Use [`EqualityComparer::new`] for `T`'s own `Eq + Hash`.
    ///
    /// # Example
    /// ```
    /// use equatable_collections::EqualityComparer;
    ///
    /// fn same_parity(a: &u32, b: &u32) -> bool {
    ///     a % 2 == b % 2
    /// }
    ///
    /// fn parity(value: &u32) -> u64 {
    ///     u64::from(value % 2)
    /// }
    ///
    /// let by_parity = EqualityComparer::from_fns(same_parity, parity);
    /// assert!(by_parity.equals(&1, &7));
    /// assert_eq!(by_parity.hash(&2), by_parity.hash(&4));
    /// ```
    pub const fn from_fns(equals: EqualsFn<T>, hash: HashFn<T>) -> Self {
        Self {
            policy: Policy::Fns { equals, hash },
        }
    }

    /// A policy backed by a [`Comparer`] object.
    ///
    /// Clones share the same object. Separately built comparers are the same
    /// policy only when their type is zero-sized, since a stateless type can
    /// only ever behave one way.
    pub fn shared<C>(comparer: C) -> Self
    where
        C: Comparer<T> + 'static,
    {
        Self {
            policy: Policy::Shared {
                comparer: Arc::new(comparer),
                type_id: TypeId::of::<C>(),
                stateless: size_of::<C>() == 0,
                name: type_name::<C>(),
            },
        }
    }

    /// Whether `a` and `b` are equal under this policy.
    #[inline]
    pub fn equals(&self, a: &T, b: &T) -> bool {
        match &self.policy {
            Policy::Default { equals, .. } | Policy::Fns { equals, .. } => equals(a, b),
            Policy::Shared { comparer, .. } => comparer.equals(a, b),
        }
    }

    /// Hash of `value` under this policy.
    #[inline]
    pub fn hash(&self, value: &T) -> u64 {
        match &self.policy {
            Policy::Default { hash, .. } | Policy::Fns { hash, .. } => hash(value),
            Policy::Shared { comparer, .. } => comparer.hash(value),
        }
    }

    /// True for the policy built by [`EqualityComparer::new`].
    pub fn is_default(&self) -> bool {
        matches!(self.policy, Policy::Default { .. })
    }

    /// Whether `self` and `other` are known to behave identically.
    ///
    /// - two default policies always are;
    /// - two function policies are when both function pointers match;
    /// - two shared policies are when they share one comparer object, or when
    ///   both wrap the same zero-sized comparer type.
    ///
    /// Anything else is treated as a different policy, even if the two happen
    /// to agree on every input.
    pub fn same_policy(&self, other: &Self) -> bool {
        match (&self.policy, &other.policy) {
            (Policy::Default { .. }, Policy::Default { .. }) => true,
            (
                Policy::Fns { equals, hash },
                Policy::Fns {
                    equals: other_equals,
                    hash: other_hash,
                },
            ) => std::ptr::fn_addr_eq(*equals, *other_equals) && std::ptr::fn_addr_eq(*hash, *other_hash),
            (
                Policy::Shared {
                    comparer,
                    type_id,
                    stateless,
                    ..
                },
                Policy::Shared {
                    comparer: other_comparer,
                    type_id: other_type_id,
                    ..
                },
            ) => {
                std::ptr::addr_eq(Arc::as_ptr(comparer), Arc::as_ptr(other_comparer))
                    || (*stateless && type_id == other_type_id)
            }
            _ => false,
        }
    }
}

impl<T: Eq + Hash> Default for EqualityComparer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for EqualityComparer<T> {
    fn clone(&self) -> Self {
        let policy = match &self.policy {
            Policy::Default { equals, hash } => Policy::Default {
                equals: *equals,
                hash: *hash,
            },
            Policy::Fns { equals, hash } => Policy::Fns {
                equals: *equals,
                hash: *hash,
            },
            Policy::Shared {
                comparer,
                type_id,
                stateless,
                name,
            } => Policy::Shared {
                comparer: Arc::clone(comparer),
                type_id: *type_id,
                stateless: *stateless,
                name: *name,
            },
        };
        Self { policy }
    }
}

impl<T> fmt::Debug for EqualityComparer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.policy {
            Policy::Default { .. } => f.write_str("EqualityComparer::Default"),
            Policy::Fns { .. } => f.write_str("EqualityComparer::Fns"),
            Policy::Shared { name, .. } => write!(f, "EqualityComparer::Shared({name})"),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
