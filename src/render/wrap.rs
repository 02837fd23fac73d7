//! Greedy word-wrapping against an arbitrary width measurer.
//!
//! The measurer is a closure bound to a concrete font and size, so the same
//! algorithm serves pixel-measured TTF text, the builtin bitmap font, and
//! plain character budgets (measure = char count).

/// Wrap `text` into lines no wider than `max_width` under `measure`.
///
/// Words are whitespace-delimited and never split: a single word wider than
/// `max_width` is placed alone on its own line and allowed to overflow.
/// Concatenating the words of all returned lines reproduces the input word
/// sequence. Empty input yields no lines.
pub fn wrap_lines<F>(text: &str, measure: F, max_width: f32) -> Vec<String>
where
    F: Fn(&str) -> f32,
{
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }

        let candidate = format!("{} {}", current, word);
        if measure(&candidate) > max_width {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        } else {
            current = candidate;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn char_count(s: &str) -> f32 {
        s.chars().count() as f32
    }

    #[test]
    fn empty_text_yields_no_lines() {
        assert!(wrap_lines("", char_count, 30.0).is_empty());
        assert!(wrap_lines("   \t\n  ", char_count, 30.0).is_empty());
    }

    #[test]
    fn word_order_is_preserved() {
        let text = "the quick brown fox jumps over the lazy dog";
        let lines = wrap_lines(text, char_count, 12.0);

        let rejoined: Vec<&str> = lines.iter().flat_map(|l| l.split(' ')).collect();
        let original: Vec<&str> = text.split_whitespace().collect();
        assert_eq!(rejoined, original);
    }

    #[test]
    fn lines_fit_the_width_budget() {
        let text = "Experience luxury like never before at our seaside retreat!";
        let lines = wrap_lines(text, char_count, 30.0);

        assert!(lines.len() >= 2);
        for line in &lines {
            assert!(
                char_count(line) <= 30.0,
                "line {:?} exceeds the budget",
                line
            );
        }
    }

    #[test]
    fn overlong_word_gets_its_own_line() {
        let lines = wrap_lines("a pneumonoultramicroscopic b", char_count, 10.0);
        assert_eq!(lines, vec!["a", "pneumonoultramicroscopic", "b"]);
    }

    #[test]
    fn single_word_input() {
        assert_eq!(wrap_lines("hello", char_count, 3.0), vec!["hello"]);
        assert_eq!(wrap_lines("hello", char_count, 30.0), vec!["hello"]);
    }

    #[test]
    fn wrapping_is_deterministic() {
        let text = "warm lighting inviting atmosphere high quality photography";
        let a = wrap_lines(text, char_count, 20.0);
        let b = wrap_lines(text, char_count, 20.0);
        assert_eq!(a, b);
    }

    #[test]
    fn pixel_measure_behaves_like_scaled_chars() {
        // A fixed-advance measure is the degenerate pixel case.
        let measure = |s: &str| s.chars().count() as f32 * 8.0;
        let lines = wrap_lines("one two three four five six", measure, 80.0);
        for line in &lines {
            assert!(measure(line) <= 80.0);
        }
    }
}
