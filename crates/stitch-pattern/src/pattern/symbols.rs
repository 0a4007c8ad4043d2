//! Display symbols for palette entries.

const ALPHABET: &[u8; 52] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Symbol printed in chart cells for palette `index`.
///
/// `0..26` map to `A..Z`, `26..52` to `a..z`. Larger indices continue in
/// bijective base 52 over the same alphabet (`52` is `"AA"`, `53` is `"AB"`),
/// so every index gets a distinct symbol.
///
/// # Example
///
/// ```
/// use stitch_pattern::symbol_for_index;
///
/// assert_eq!(symbol_for_index(0), "A");
/// assert_eq!(symbol_for_index(26), "a");
/// assert_eq!(symbol_for_index(52), "AA");
/// ```
pub fn symbol_for_index(index: usize) -> String {
    let mut n = index + 1;
    let mut chars = Vec::new();
    while n > 0 {
        n -= 1;
        chars.push(ALPHABET[n % 52] as char);
        n /= 52;
    }
    chars.iter().rev().collect()
}
