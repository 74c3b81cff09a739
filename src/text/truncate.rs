/// Glyph inserted where characters were elided.
pub const ELLIPSIS: char = '…';

/// Number of trailing characters kept by [`EllipsizeMode::Prefix`].
pub const PREFIX_TAIL_LEN: usize = 3;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
/// Where the ellipsis replaces the characters that do not fit.
pub enum EllipsizeMode {
    /// `…` followed by the last three characters.
    Prefix,
    /// Head and tail of the text joined by `…`.
    Middle,
    /// The first `max_length` characters followed by `…`.
    #[default]
    Suffix,
}

/// Shortens `text` to the display form for a character budget.
///
/// Lengths are counted in `char`s. `None` means unbounded, in which case (or
/// when the text already fits) the text is returned unchanged.
///
/// [`EllipsizeMode::Prefix`] always keeps a fixed tail of
/// [`PREFIX_TAIL_LEN`] characters whatever the budget is. Texts shorter than
/// that keep all of their characters.
pub fn truncate(text: &str, max_length: Option<usize>, mode: EllipsizeMode) -> String {
    let len = text.chars().count();
    let max = match max_length {
        Some(max) if len > max => max,
        _ => return text.to_string(),
    };

    let truncated = match mode {
        EllipsizeMode::Suffix => {
            let mut out: String = text.chars().take(max).collect();
            out.push(ELLIPSIS);
            out
        }
        EllipsizeMode::Prefix => {
            let mut out = String::from(ELLIPSIS);
            out.push_str(tail(text, len, PREFIX_TAIL_LEN));
            out
        }
        EllipsizeMode::Middle => {
            let head_len = max / 2;
            let tail_len = max - head_len;
            let mut out: String = text.chars().take(head_len).collect();
            out.push(ELLIPSIS);
            out.push_str(tail(text, len, tail_len));
            out
        }
    };

    log::debug!("truncated {len} chars to {max} ({mode:?}): {truncated:?}");
    truncated
}

/// Last `count` characters of `text`, which has `len` characters.
fn tail(text: &str, len: usize, count: usize) -> &str {
    let skip = len.saturating_sub(count);
    match text.char_indices().nth(skip) {
        Some((byte, _)) => &text[byte..],
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODES: [EllipsizeMode; 3] = [
        EllipsizeMode::Prefix,
        EllipsizeMode::Middle,
        EllipsizeMode::Suffix,
    ];

    #[test]
    fn fitting_text_is_unchanged_in_every_mode() {
        for mode in MODES {
            assert_eq!(truncate("HelloWorld", None, mode), "HelloWorld");
            assert_eq!(truncate("HelloWorld", Some(10), mode), "HelloWorld");
            assert_eq!(truncate("HelloWorld", Some(42), mode), "HelloWorld");
            assert_eq!(truncate("", Some(0), mode), "");
        }
    }

    #[test]
    fn suffix_keeps_the_head() {
        assert_eq!(
            truncate("HelloWorld", Some(5), EllipsizeMode::Suffix),
            "Hello…"
        );
        assert_eq!(truncate("HelloWorld", Some(0), EllipsizeMode::Suffix), "…");
    }

    #[test]
    fn middle_splits_the_budget() {
        // head = 5 / 2 = 2, tail = 3
        assert_eq!(
            truncate("HelloWorld", Some(5), EllipsizeMode::Middle),
            "He…rld"
        );
        assert_eq!(
            truncate("HelloWorld", Some(4), EllipsizeMode::Middle),
            "He…ld"
        );
        assert_eq!(truncate("HelloWorld", Some(1), EllipsizeMode::Middle), "…d");
    }

    #[test]
    fn prefix_tail_ignores_the_budget() {
        assert_eq!(
            truncate("HelloWorld", Some(5), EllipsizeMode::Prefix),
            "…rld"
        );
        assert_eq!(
            truncate("HelloWorld", Some(8), EllipsizeMode::Prefix),
            "…rld"
        );
        assert_eq!(
            truncate("HelloWorld", Some(1), EllipsizeMode::Prefix),
            "…rld"
        );
    }

    #[test]
    fn prefix_on_short_text_degrades() {
        assert_eq!(truncate("ab", Some(1), EllipsizeMode::Prefix), "…ab");
        assert_eq!(truncate("a", Some(0), EllipsizeMode::Prefix), "…a");
    }

    #[test]
    fn counts_chars_not_bytes() {
        assert_eq!(
            truncate("日本語のテキスト", Some(3), EllipsizeMode::Suffix),
            "日本語…"
        );
        assert_eq!(
            truncate("日本語のテキスト", Some(3), EllipsizeMode::Middle),
            "日…スト"
        );
        assert_eq!(
            truncate("日本語のテキスト", Some(3), EllipsizeMode::Prefix),
            "…キスト"
        );
    }
}
