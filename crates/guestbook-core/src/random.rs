//! Random short strings for verification codes and generated secrets.

use rand::distr::Alphanumeric;
use rand::Rng;

/// Length of an email verification code.
pub const VERIFICATION_CODE_LEN: usize = 6;

/// Generate a random string of `len` ASCII letters and digits.
pub fn random_string(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_string_length_and_charset() {
        let code = random_string(VERIFICATION_CODE_LEN);
        assert_eq!(code.len(), VERIFICATION_CODE_LEN);
        assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_random_string_zero_len() {
        assert!(random_string(0).is_empty());
    }
}
