// ============================================================================
// equatable-collections - Literal Macros
// ============================================================================

/// Build an [`EquatableArray`](crate::EquatableArray) from a list of elements.
///
/// # Usage
///
/// ```rust
/// use equatable_collections::{equatable_array, EquatableArray};
///
/// let steps = equatable_array!["fetch", "parse", "render"];
/// assert_eq!(steps.len(), 3);
///
/// let none: EquatableArray<u8> = equatable_array![];
/// assert!(none.is_empty());
/// ```
#[macro_export]
macro_rules! equatable_array {
    () => {
        $crate::EquatableArray::new()
    };
    ($($item:expr),+ $(,)?) => {
        $crate::EquatableArray::from([$($item),+])
    };
}

/// Build an [`EquatableMap`](crate::EquatableMap) with the default comparers.
///
/// Later entries replace earlier ones with the same key.
///
/// # Usage
///
/// ```rust
/// use equatable_collections::equatable_map;
///
/// let limits = equatable_map! {
///     "cpu" => 4,
///     "memory" => 512,
/// };
/// assert_eq!(limits[&"cpu"], 4);
/// assert_eq!(limits, equatable_map! { "memory" => 512, "cpu" => 4 });
/// ```
#[macro_export]
macro_rules! equatable_map {
    () => {
        $crate::EquatableMap::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        <$crate::EquatableMap<_, _> as ::core::iter::FromIterator<_>>::from_iter([$(($key, $value)),+])
    };
}

/// Build an [`EquatableSet`](crate::EquatableSet) with the default comparer.
///
/// # Usage
///
/// ```rust
/// use equatable_collections::equatable_set;
///
/// let tags = equatable_set!["red", "green", "red"];
/// assert_eq!(tags.len(), 2);
/// assert_eq!(tags, equatable_set!["green", "red"]);
/// ```
#[macro_export]
macro_rules! equatable_set {
    () => {
        $crate::EquatableSet::new()
    };
    ($($item:expr),+ $(,)?) => {
        <$crate::EquatableSet<_> as ::core::iter::FromIterator<_>>::from_iter([$($item),+])
    };
}
