//! Property tests for the pattern normalizer contract: the invariants
//! every parsed pattern upholds, and idempotence of the transformation.

use fluentkit::normalize::normalize;
use fluentkit::{parse_resource, Entry, Pattern, PatternElement};
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

fn continuation_line() -> impl Strategy<Value = (usize, String)> {
    (1usize..6, "[a-z]{0,10}")
}

fn assert_invariants(pattern: &Pattern) {
    for window in pattern.elements.windows(2) {
        assert!(
            !matches!(
                window,
                [PatternElement::Text(_), PatternElement::Text(_)]
            ),
            "adjacent text runs in {:?}",
            pattern
        );
    }
    for element in &pattern.elements {
        if let PatternElement::Text(text) = element {
            assert!(!text.is_empty(), "empty text run in {:?}", pattern);
            assert!(!text.contains('\r'), "unnormalized newline in {:?}", pattern);
        }
    }
    if let Some(PatternElement::Text(first)) = pattern.elements.first() {
        assert!(
            !first.starts_with(' ') && !first.starts_with('\n'),
            "leading whitespace in {:?}",
            pattern
        );
    }
    if let Some(PatternElement::Text(last)) = pattern.elements.last() {
        assert!(
            !last.ends_with(' ') && !last.ends_with('\n'),
            "trailing whitespace in {:?}",
            pattern
        );
    }
}

proptest! {
    #[test]
    fn parsed_patterns_uphold_the_invariants(
        lines in prop::collection::vec(continuation_line(), 0..6),
        first in "[a-z]{1,10}",
    ) {
        let mut source = format!("msg = {}\n", first);
        for (indent, text) in &lines {
            source.push_str(&" ".repeat(*indent));
            source.push_str(text);
            source.push('\n');
        }

        let entries = parse_resource(&source).unwrap();
        prop_assert_eq!(entries.len(), 1);
        let Entry::Message(message) = &entries[0] else {
            return Err(TestCaseError::fail("expected a message"));
        };
        assert_invariants(&message.pattern);

        // The normalizer is idempotent: the parsed pattern is a fixed
        // point.
        let mut again = message.pattern.clone();
        normalize(&mut again);
        prop_assert_eq!(&again, &message.pattern);
    }

    #[test]
    fn common_indent_is_fully_stripped(
        extra in 0usize..5,
        indent in 1usize..5,
        lines in prop::collection::vec("[a-z]{1,8}", 1..5),
    ) {
        // All continuation lines share `indent` spaces; the second gets
        // `extra` more. The shared indent must disappear, the extra must
        // survive. (Extra indent on the very first line would be removed
        // by the leading-whitespace trim instead.)
        let mut source = String::from("msg =\n");
        for (index, line) in lines.iter().enumerate() {
            let pad = if index == 1 { indent + extra } else { indent };
            source.push_str(&" ".repeat(pad));
            source.push_str(line);
            source.push('\n');
        }

        let entries = parse_resource(&source).unwrap();
        let Entry::Message(message) = &entries[0] else {
            return Err(TestCaseError::fail("expected a message"));
        };
        let [PatternElement::Text(text)] = message.pattern.elements.as_slice() else {
            return Err(TestCaseError::fail("expected a single text run"));
        };

        let mut expected = String::new();
        for (index, line) in lines.iter().enumerate() {
            if index > 0 {
                expected.push('\n');
            }
            if index == 1 {
                expected.push_str(&" ".repeat(extra));
            }
            expected.push_str(line);
        }
        prop_assert_eq!(text, &expected);
    }
}
