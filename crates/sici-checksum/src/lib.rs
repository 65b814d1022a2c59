//! Check character computation for Serial Item and Contribution
//! Identifiers (ANSI/NISO Z39.56).
//!
//! The check character closes every SICI: it is separated from the
//! control segment by a hyphen and is derived from everything before
//! it with a weighted modulus-37 sum. Digits carry their face value,
//! `A`-`Z` carry 10 through 35, and every other character (including
//! the structural punctuation) carries 36. Weights repeat 1, 2, 4, 8
//! from right to left, starting at the hyphen that precedes the check
//! character position; the check character is the one whose value
//! raises the weighted sum to an even multiple of 37.
//!
//! The computation is total and pure: identical input always yields
//! the identical character, and the output is always drawn from
//! [`CHECK_ALPHABET`].

/// The 37-character alphabet check characters are drawn from.
pub const CHECK_ALPHABET: &[u8; 37] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ#";

const WEIGHTS: [u64; 4] = [1, 2, 4, 8];

/// Numeric value of one character in the weighted sum.
///
/// Digits map to their face value, uppercase letters to 10 through 35,
/// and every other character to 36.
pub fn char_value(c: char) -> u64 {
    match c {
        '0'..='9' => u64::from(c) - u64::from('0'),
        'A'..='Z' => u64::from(c) - u64::from('A') + 10,
        _ => 36,
    }
}

/// Compute the check character for a SICI prefix.
///
/// `prefix` is the serialized identifier up to, but not including, the
/// hyphen that precedes the check character; the hyphen itself
/// participates in the sum and is supplied here.
pub fn check_char(prefix: &str) -> char {
    let sum: u64 = prefix
        .chars()
        .chain(std::iter::once('-'))
        .rev()
        .zip(WEIGHTS.iter().cycle())
        .map(|(c, weight)| char_value(c) * weight)
        .sum();
    let value = (37 - sum % 37) % 37;
    char::from(CHECK_ALPHABET[value as usize])
}
