//! Post-generation exclusion filter.

use numform_core::digits::DigitSet;

/// Drop entries whose first character is in `front` or whose last character
/// is in `back`. Empty sets exclude nothing; order of survivors is kept.
pub fn exclude_edges(mut items: Vec<String>, front: &DigitSet, back: &DigitSet) -> Vec<String> {
    if front.is_empty() && back.is_empty() {
        return items;
    }
    items.retain(|item| {
        let first = item.chars().next();
        let last = item.chars().next_back();
        !first.is_some_and(|c| front.contains(c)) && !last.is_some_and(|c| back.contains(c))
    });
    items
}
