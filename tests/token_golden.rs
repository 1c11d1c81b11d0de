use birdle_daily::catalog::Bird;
use birdle_daily::publish::{
    answer_token, find_bird_by_token, fold_hash, SaltedFoldToken, TokenScheme, DEFAULT_SECRET_SALT,
};
use birdle_daily::types::AnswerToken;

#[test]
fn golden_tokens_match_client_fold() {
    // Values frozen against the browser client's fold
    assert_eq!(answer_token("amro1", DEFAULT_SECRET_SALT).as_str(), "6a180542");
    assert_eq!(answer_token("nofl", DEFAULT_SECRET_SALT).as_str(), "d9c16ec3");
    assert_eq!(answer_token("robin", DEFAULT_SECRET_SALT).as_str(), "fcd285c0");
    assert_eq!(answer_token("cardinal", DEFAULT_SECRET_SALT).as_str(), "e066f30a");
}

#[test]
fn short_hashes_are_zero_padded() {
    assert_eq!(fold_hash("a-b"), 0x0001_71f6);
    assert_eq!(answer_token("a", "b").as_str(), "000171f6");
}

#[test]
fn fold_uses_code_points_not_bytes() {
    // 'é' is one code point (0xE9) but two UTF-8 bytes
    assert_eq!(answer_token("é", "x").as_str(), "00037094");
}

#[test]
fn tokens_are_deterministic_and_well_formed() {
    let scheme = SaltedFoldToken::default();
    for id in ["amro1", "nofl", "x", "a-very-long-species-code-with-dashes", "ñandú"] {
        let first = scheme.token(id);
        let second = scheme.token(id);
        assert_eq!(first, second);
        assert_eq!(first.as_str().len(), 8);
        assert!(first
            .as_str()
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }
}

#[test]
fn salt_changes_token() {
    assert_ne!(answer_token("amro1", "salt-a"), answer_token("amro1", "salt-b"));
}

#[test]
fn reverse_lookup_finds_bird_case_insensitively() {
    let birds = vec![
        Bird::new("amro1", "American Robin"),
        Bird::new("nofl", "Northern Flicker"),
    ];
    let scheme = SaltedFoldToken::default();

    let token = AnswerToken::parse("D9C16EC3").unwrap();
    let found = find_bird_by_token(&scheme, &birds, &token).expect("nofl should match");
    assert_eq!(found.id.as_str(), "nofl");

    let unknown = AnswerToken::parse("00000000").unwrap();
    assert!(find_bird_by_token(&scheme, &birds, &unknown).is_none());
}
