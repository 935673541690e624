//! Short identifier generation
//!
//! Short ids are the compact slugs exposed in embed snippets and share
//! links (`reviewsup-showcase-<shortId>`), distinct from internal UUIDs.

use rand::Rng;

const SHORT_ID_LEN: usize = 11;
const SHORT_ID_ALPHABET: &[u8] = b"0123456789abcdef";

/// Generate a fresh short identifier.
///
/// Uniqueness is enforced by the UNIQUE column constraint at insert time;
/// with 16^11 possible values a collision retry has never been needed.
pub fn generate_short_id() -> String {
    let mut rng = rand::thread_rng();
    (0..SHORT_ID_LEN)
        .map(|_| SHORT_ID_ALPHABET[rng.gen_range(0..SHORT_ID_ALPHABET.len())] as char)
        .collect()
}
