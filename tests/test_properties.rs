//! Property-based tests using proptest
//!
//! These tests verify invariants of the pure functions in the resolution
//! pipeline using arbitrary input generation.

use gemini_gateway::GemtextConverter;
use gemini_gateway::normalize::repair_sentinel;
use gemini_gateway::protocol::{Response, Status, parse_request};
use gemini_gateway::teaser::{ELLIPSIS, teaser};
use proptest::prelude::*;

// =============================================================================
// 1. teaser - total over all strings
// =============================================================================

proptest! {
    #[test]
    fn prop_teaser_never_panics(s in ".*") {
        let _ = teaser(&s);
    }

    #[test]
    fn prop_teaser_without_break_is_identity(s in "[^\r\n]*") {
        prop_assert_eq!(teaser(&s), s);
    }

    #[test]
    fn prop_teaser_is_prefix_plus_ellipsis(
        head in "[^\r\n]*",
        brk in prop_oneof![Just("\n"), Just("\r\n"), Just("\r")],
        tail in ".*",
    ) {
        let body = format!("{head}{brk}{tail}");
        let excerpt = teaser(&body);

        prop_assert!(excerpt.ends_with(ELLIPSIS));
        let kept = excerpt.strip_suffix(ELLIPSIS).unwrap();
        prop_assert!(head.starts_with(kept));
        // At most one terminal punctuation mark is dropped
        prop_assert!(head.len() - kept.len() <= 1);
        prop_assert!(!kept.contains(['\r', '\n']));
    }
}

// =============================================================================
// 2. Sentinel repair - only the exact "null" string is touched
// =============================================================================

proptest! {
    #[test]
    fn prop_repair_only_exact_sentinel(s in ".*") {
        let mut value = s.clone();
        let repaired = repair_sentinel(&mut value);

        if s == "null" {
            prop_assert!(repaired);
            prop_assert_eq!(value, "");
        } else {
            prop_assert!(!repaired);
            prop_assert_eq!(value, s);
        }
    }

    #[test]
    fn prop_repair_is_idempotent(s in prop_oneof![Just("null".to_string()), ".*"]) {
        let mut once = s;
        repair_sentinel(&mut once);
        let mut twice = once.clone();
        prop_assert!(!repair_sentinel(&mut twice));
        prop_assert_eq!(once, twice);
    }
}

// =============================================================================
// 3. Markup conversion - deterministic and single-line-safe
// =============================================================================

proptest! {
    #[test]
    fn prop_conversion_never_panics(html in ".{0,200}") {
        let _ = GemtextConverter::default().convert(&html);
    }

    #[test]
    fn prop_conversion_is_deterministic(
        words in prop::collection::vec("[a-zA-Z]{1,8}", 1..10),
        tag in prop_oneof![Just("p"), Just("li"), Just("h2"), Just("blockquote"), Just("em")],
    ) {
        let html = format!("<{tag}>{}</{tag}>", words.join(" "));
        let converter = GemtextConverter::default();
        prop_assert_eq!(converter.convert(&html), converter.convert(&html));
    }

    #[test]
    fn prop_plain_paragraph_keeps_words(words in prop::collection::vec("[a-zA-Z]{1,8}", 1..10)) {
        let html = format!("<p>{}</p>", words.join(" "));
        let converted = GemtextConverter::default().convert(&html).unwrap();
        prop_assert_eq!(converted, words.join(" "));
    }
}

// =============================================================================
// 4. Protocol - request parsing and response headers
// =============================================================================

proptest! {
    #[test]
    fn prop_parse_request_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..1100)) {
        let _ = parse_request(&bytes);
    }

    #[test]
    fn prop_meta_is_always_one_line(meta in ".{0,2000}") {
        let response = Response::error(Status::TemporaryFailure, &meta);
        let header = response.header();

        prop_assert!(header.ends_with("\r\n"));
        prop_assert_eq!(header.matches(['\r', '\n']).count(), 2);
        prop_assert!(response.meta().len() <= 1024);
    }
}
