//! Short random identifiers for alerts and actions.
//!
//! Identifiers are drawn from the 64-symbol URL-safe alphabet. There is no
//! registry of issued identifiers: at the default length of
//! [`DEFAULT_ID_LENGTH`] characters a collision between two live alerts is
//! statistically negligible, and that is the only guarantee provided.

use rand::Rng;

/// Length of the identifiers used for alerts and actions.
pub const DEFAULT_ID_LENGTH: usize = 6;

/// Shortest identifier length accepted for alerts and actions.
///
/// Shorter ids make collisions between displayed alerts likely, and an empty
/// id matches every alert on deletion.
pub const MIN_ID_LENGTH: usize = 4;

/// URL-safe alphabet the identifiers are drawn from.
const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

/// Generates a random identifier of `length` characters.
///
/// Every character is drawn uniformly from the URL-safe alphabet using the
/// thread-local RNG.
///
/// # Examples
///
/// ```
/// use alertwait::id::generate;
///
/// let id = generate(6);
/// assert_eq!(id.len(), 6);
/// ```
pub fn generate(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| char::from(ALPHABET[rng.gen_range(0..ALPHABET.len())]))
        .collect()
}
