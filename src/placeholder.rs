//! Interpolation placeholder protection around the translation call.
//!
//! `{$name}`-shaped tokens must pass through translation unchanged. Before
//! submission each token is wrapped in an inert `<x>` tag, and the service
//! is invoked with XML tag handling and `x` as an ignored tag; afterwards
//! the tags are stripped again. `restore(protect(text)) == text` holds for
//! any text that does not already contain the guard's own markup.

/// Opening guard tag.
const OPEN_TAG: &str = "<x>";
/// Closing guard tag.
const CLOSE_TAG: &str = "</x>";

/// Wrap every `{$...}` token in the guard tag.
///
/// An unterminated token (no closing brace) is passed through untouched.
#[must_use]
pub fn protect(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find("{$") {
        let (before, token_start) = rest.split_at(start);
        out.push_str(before);

        let Some(end) = token_start.find('}') else {
            out.push_str(token_start);
            return out;
        };
        // '}' is one byte, so end + 1 is a char boundary
        let (token, tail) = token_start.split_at(end + 1);
        out.push_str(OPEN_TAG);
        out.push_str(token);
        out.push_str(CLOSE_TAG);
        rest = tail;
    }

    out.push_str(rest);
    out
}

/// Strip the guard tags inserted by [`protect`].
#[must_use]
pub fn restore(text: &str) -> String {
    text.replace(OPEN_TAG, "").replace(CLOSE_TAG, "")
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("Hello {$name}", "Hello <x>{$name}</x>")]
    #[case("{$count} of {$total}", "<x>{$count}</x> of <x>{$total}</x>")]
    #[case("no placeholders here", "no placeholders here")]
    #[case("", "")]
    // Adjacent tokens
    #[case("{$a}{$b}", "<x>{$a}</x><x>{$b}</x>")]
    // Plain braces are not interpolation tokens
    #[case("set {key} to {$value}", "set {key} to <x>{$value}</x>")]
    // Unterminated token passes through
    #[case("broken {$name", "broken {$name")]
    fn protect_cases(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(protect(input), expected);
    }

    #[rstest]
    #[case("Hello {$name}")]
    #[case("{$count} of {$total}")]
    #[case("nothing to protect")]
    #[case("")]
    #[case("tail {$a} mid {$b} head")]
    #[case("broken {$name")]
    fn restore_inverts_protect(#[case] input: &str) {
        assert_eq!(restore(&protect(input)), input);
    }

    #[rstest]
    fn restore_strips_tags_reordered_by_the_service() {
        // The service may move the protected token within the sentence
        assert_eq!(restore("Hallo <x>{$name}</x>, willkommen"), "Hallo {$name}, willkommen");
    }
}
