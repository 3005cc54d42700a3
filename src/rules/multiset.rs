//! Multiset helpers over slices of card ids.
//!
//! Hands and selections are plain slices where order is iteration order
//! and repeats are copies. These helpers compare them by (id -> count).

use rustc_hash::FxHashMap;
use std::hash::Hash;

/// Count occurrences of each item.
pub fn counts<T: Copy + Eq + Hash>(items: &[T]) -> FxHashMap<T, usize> {
    let mut map = FxHashMap::default();
    for item in items {
        *map.entry(*item).or_insert(0) += 1;
    }
    map
}

/// Exact-multiset match: same distinct items, same counts, nothing extra.
pub fn equals_requirement<T: Copy + Eq + Hash>(selection: &[T], requirement: &[(T, u8)]) -> bool {
    let total: usize = requirement.iter().map(|(_, q)| *q as usize).sum();
    if selection.len() != total {
        return false;
    }
    let have = counts(selection);
    have.len() == requirement.len()
        && requirement
            .iter()
            .all(|(item, q)| have.get(item).copied() == Some(*q as usize))
}

/// `pool` holds at least the required count of every item.
pub fn contains_requirement<T: Copy + Eq + Hash>(pool: &[T], requirement: &[(T, u8)]) -> bool {
    let have = counts(pool);
    requirement
        .iter()
        .all(|(item, q)| have.get(item).copied().unwrap_or(0) >= *q as usize)
}

/// Every item of `sub` is available in `pool`, counting repeats.
pub fn is_sub_multiset<T: Copy + Eq + Hash>(sub: &[T], pool: &[T]) -> bool {
    let mut have = counts(pool);
    for item in sub {
        match have.get_mut(item) {
            Some(n) if *n > 0 => *n -= 1,
            _ => return false,
        }
    }
    true
}

/// Remove one instance of each item of `items` from `from`.
///
/// All-or-nothing: returns `false` and leaves `from` untouched when
/// `items` is not a sub-multiset of it.
pub fn remove_each<T: Copy + Eq + Hash>(from: &mut Vec<T>, items: &[T]) -> bool {
    if !is_sub_multiset(items, from) {
        return false;
    }
    for item in items {
        if let Some(pos) = from.iter().position(|x| x == item) {
            from.remove(pos);
        }
    }
    true
}
