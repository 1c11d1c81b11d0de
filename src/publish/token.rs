use crate::catalog::Bird;
use crate::types::identifiers::AnswerToken;

pub const DEFAULT_SECRET_SALT: &str = "birdle-salt-2025";

/// 32-bit multiplicative string fold: `h = h * 31 + c` per code point,
/// wrapping in two's complement, starting from 0.
///
/// Not a cryptographic hash. The browser client runs the same fold to
/// match tokens, so this must stay bit-for-bit stable.
pub fn fold_hash(input: &str) -> u32 {
    let folded = input.chars().fold(0i32, |acc, c| {
        acc.wrapping_mul(31).wrapping_add(c as i32)
    });
    folded as u32
}

/// Derives the public token for a bird id.
pub trait TokenScheme {
    fn token(&self, bird_id: &str) -> AnswerToken;
}

/// `fold_hash(bird_id + "-" + salt)` rendered as 8 hex characters.
#[derive(Debug, Clone)]
pub struct SaltedFoldToken {
    salt: String,
}

impl SaltedFoldToken {
    pub fn new(salt: impl Into<String>) -> Self {
        Self { salt: salt.into() }
    }
}

impl Default for SaltedFoldToken {
    fn default() -> Self {
        Self::new(DEFAULT_SECRET_SALT)
    }
}

impl TokenScheme for SaltedFoldToken {
    fn token(&self, bird_id: &str) -> AnswerToken {
        answer_token(bird_id, &self.salt)
    }
}

pub fn answer_token(bird_id: &str, salt: &str) -> AnswerToken {
    let combined = format!("{bird_id}-{salt}");
    AnswerToken::from_hash(fold_hash(&combined))
}

/// Resolve a published token back to a bird by hashing every candidate.
/// First match wins.
pub fn find_bird_by_token<'a, S: TokenScheme>(
    scheme: &S,
    birds: &'a [Bird],
    token: &AnswerToken,
) -> Option<&'a Bird> {
    birds
        .iter()
        .find(|bird| scheme.token(bird.id.as_str()) == *token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fold_of_empty_is_zero() {
        assert_eq!(fold_hash(""), 0);
    }

    #[test]
    fn fold_wraps_like_i32() {
        // 31 * 31 * ... overflows well before 10 characters
        let long = "zzzzzzzzzzzzzzzz";
        let expected = long
            .chars()
            .fold(0u64, |acc, c| (acc * 31 + c as u64) & 0xFFFF_FFFF) as u32;
        assert_eq!(fold_hash(long), expected);
    }
}
