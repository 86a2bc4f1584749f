/// A body text word equal to this token forces a line break. The token
/// only counts when it stands alone between spaces; `\n` embedded in a
/// word is ordinary text.
pub const LINE_BREAK: &str = "\\n";

/// Greedy word-wrap against a pixel width, with forced breaks.
///
/// `measure` returns the rendered width of a string; injecting it keeps
/// this independent of any particular font.
pub fn wrap_words<F>(text: &str, max_width: f32, measure: F) -> Vec<String>
where
    F: Fn(&str) -> f32,
{
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.trim().split(' ') {
        if word.is_empty() {
            continue;
        }

        if word == LINE_BREAK {
            lines.push(std::mem::take(&mut line));
            continue;
        }

        if measure(word) > max_width {
            tracing::warn!("word is too long to be printed properly: {word:?}");
        }

        if line.is_empty() {
            line = word.to_string();
            continue;
        }

        let candidate = format!("{line} {word}");
        if measure(&candidate) < max_width {
            line = candidate;
        } else {
            lines.push(std::mem::take(&mut line));
            line = word.to_string();
        }
    }

    lines.push(line);
    lines
}

/// Inverse of [`wrap_words`]: joins lines with forced break tokens so
/// the result wraps back to the same line boundaries.
pub fn join_lines(lines: &[String]) -> String {
    lines.join(&format!(" {LINE_BREAK} "))
}
