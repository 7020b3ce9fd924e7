//! Property tests for token derivation and path construction.

use proptest::prelude::*;
use pushkit_lib::protocol::{
    build_listen_url, build_notification_path, hash_identifier, normalize_identifier,
    split_listen_url, TOKEN_LENGTH,
};
use pushkit_lib::PushkitError;

// Latin-1, Greek and Cyrillic letters whose case mappings round-trip.
fn identifier() -> impl Strategy<Value = String> {
    "[A-Za-z0-9@._+À-Öà-öΑ-Ρα-ρА-Яа-я-]{1,40}"
}

fn padding() -> impl Strategy<Value = String> {
    "[ \t\n]{0,4}"
}

proptest! {
    #[test]
    fn token_is_twelve_lowercase_hex(id in identifier()) {
        let token = hash_identifier(&id).unwrap();
        prop_assert_eq!(token.as_str().len(), TOKEN_LENGTH);
        prop_assert!(token.as_str().chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
    }

    #[test]
    fn token_is_deterministic(id in identifier()) {
        prop_assert_eq!(hash_identifier(&id).unwrap(), hash_identifier(&id).unwrap());
    }

    #[test]
    fn token_ignores_case_and_padding(id in identifier(), left in padding(), right in padding()) {
        let padded = format!("{left}{}{right}", id.to_uppercase());
        prop_assert_eq!(
            hash_identifier(&padded).unwrap(),
            hash_identifier(&id.to_lowercase()).unwrap()
        );
    }

    #[test]
    fn normalization_keeps_char_count(id in identifier(), tricky in "[ΣİẞÅ]{0,6}") {
        let raw = format!("{id}{tricky}");
        let normalized = normalize_identifier(&raw).unwrap();
        prop_assert_eq!(normalized.chars().count(), raw.chars().count());
    }

    #[test]
    fn whitespace_only_is_rejected(blank in "[ \t\r\n]{0,8}") {
        let rejected = matches!(
            hash_identifier(&blank),
            Err(PushkitError::InvalidArgument { .. })
        );
        prop_assert!(rejected);
    }

    #[test]
    fn path_embeds_token(id in identifier()) {
        let path = build_notification_path(&id).unwrap();
        let token = hash_identifier(&id).unwrap();
        prop_assert_eq!(path, format!("notifications/{}", token));
    }

    #[test]
    fn listen_url_ignores_one_trailing_slash(
        host in "[a-z][a-z0-9]{0,20}",
        id in identifier(),
    ) {
        let base = format!("https://{host}.example.com");
        let with_slash = build_listen_url(&format!("{base}/"), &id).unwrap();
        let without = build_listen_url(&base, &id).unwrap();
        prop_assert_eq!(&with_slash, &without);

        let (root, path) = split_listen_url(&without).unwrap();
        prop_assert_eq!(root, base);
        prop_assert_eq!(path, build_notification_path(&id).unwrap());
    }
}
