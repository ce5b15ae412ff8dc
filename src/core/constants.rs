// ============================================================================
// equatable-collections - Constants
// Trie geometry and hashing constants shared by every collection
// ============================================================================

// =============================================================================
// TRIE GEOMETRY
// =============================================================================

/// Number of hash bits consumed by each trie level.
pub const BITS_PER_LEVEL: u32 = 5;

/// Children per branch node (one bit of the bitmap each).
pub const BRANCH_FACTOR: usize = 1 << BITS_PER_LEVEL;

/// Mask selecting one level's worth of hash bits.
pub const LEVEL_MASK: u64 = (BRANCH_FACTOR as u64) - 1;

/// Width of the hashes the trie is keyed on.
pub const HASH_BITS: u32 = u64::BITS;

// =============================================================================
// HASHING
// =============================================================================

/// Seeds for the process-wide default hash state.
///
/// Fixed so that two collections built independently hash equal values to the
/// same code. Hashes are not stable across builds of this crate or across
/// `ahash` versions and must never be persisted.
pub const DEFAULT_HASH_SEEDS: [u64; 4] = [
    0x243f_6a88_85a3_08d3,
    0x1319_8a2e_0370_7344,
    0xa409_3822_299f_31d0,
    0x082e_fa98_ec4e_6c89,
];

/// FNV-1a offset basis, the starting value of ordered (array) hashes.
pub const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;

/// FNV-1a prime.
pub const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

// =============================================================================
// TESTS
// =============================================================================
