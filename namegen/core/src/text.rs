//! Text Helpers
//!
//! Random selection and ellipsis truncation. Lengths are counted in
//! `char`s, never bytes, so multi-byte words are cut on character boundaries.

use rand::seq::SliceRandom;
use rand::Rng;

/// Marker appended to truncated strings
pub const ELLIPSIS: &str = "...";

/// Maximum length of a single generated word
pub const WORD_MAX_LEN: usize = 40;

/// Maximum length of a selector option label
pub const SELECTOR_LABEL_MAX_LEN: usize = 50;

/// Pick an element at a uniformly random index
///
/// Returns `None` for an empty slice; callers that need a value must
/// guarantee a non-empty input.
pub fn pick_random<'a, T, R>(items: &'a [T], rng: &mut R) -> Option<&'a T>
where
    R: Rng + ?Sized,
{
    items.choose(rng)
}

/// Shorten `s` to at most `max_len` characters
///
/// Strings longer than `max_len` keep their first `max_len - 3` characters
/// followed by [`ELLIPSIS`]. Shorter strings are returned unchanged.
#[must_use]
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }

    let keep = max_len.saturating_sub(ELLIPSIS.len());
    let mut out: String = s.chars().take(keep).collect();
    out.extend(ELLIPSIS.chars().take(max_len - keep));
    out
}
