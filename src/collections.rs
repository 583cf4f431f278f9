//! Hasher-specialized collection aliases, in the style this codebase's
//! other crates share via `dada-collections`: fast, non-DoS-resistant
//! hashing is fine for a compiler front-end's own data structures.

use std::hash::BuildHasherDefault;

use rustc_hash::FxHasher;

pub type IndexMap<K, V> = indexmap::IndexMap<K, V, BuildHasherDefault<FxHasher>>;
