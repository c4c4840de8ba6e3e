// Clean dictation text before it is embedded in a prompt.
// Strips invisible Unicode, neutralizes code fences, normalizes whitespace.

/// Maximum dictation length embedded in a prompt (characters).
pub const MAX_DICTATION_CHARS: usize = 10_000;

const TRUNCATION_MARKER: &str = "…[TRUNCATED]";

/// Sanitize dictation for prompt embedding.
pub fn sanitize_dictation(raw: &str) -> String {
    let visible = remove_invisible_chars(raw);
    let defenced = neutralize_code_fences(&visible);
    let normalized = normalize_whitespace(&defenced);
    let sanitized = truncate_chars(&normalized, MAX_DICTATION_CHARS);

    if sanitized.len() != raw.len() {
        tracing::debug!(
            input_len = raw.len(),
            output_len = sanitized.len(),
            "Dictation sanitized"
        );
    }
    sanitized
}

/// Drop zero-width, bidi and control characters. Keeps space, tab and newlines.
fn remove_invisible_chars(text: &str) -> String {
    text.chars()
        .filter(|c| {
            if matches!(*c, ' ' | '\n' | '\t' | '\r') {
                return true;
            }
            if matches!(
                *c,
                '\u{200B}'..='\u{200F}' | '\u{202A}'..='\u{202E}' | '\u{2060}'..='\u{2064}' | '\u{FEFF}'
            ) {
                return false;
            }
            !c.is_control()
        })
        .collect()
}

/// A dictation must not open or close a fenced block inside the prompt,
/// otherwise the model may mistake it for its own output format.
fn neutralize_code_fences(text: &str) -> String {
    text.replace("```", "'''")
}

/// Trim each line, collapse runs of blank lines, drop leading/trailing blanks.
fn normalize_whitespace(text: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();
    let mut prev_blank = true;

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            if !prev_blank {
                lines.push("");
            }
            prev_blank = true;
        } else {
            lines.push(trimmed);
            prev_blank = false;
        }
    }

    while lines.last() == Some(&"") {
        lines.pop();
    }

    lines.join("\n")
}

/// Truncate to `max_chars` characters, preferring the last whitespace break.
fn truncate_chars(text: &str, max_chars: usize) -> String {
    let Some((cut, _)) = text.char_indices().nth(max_chars) else {
        return text.to_string();
    };

    let head = &text[..cut];
    let end = head
        .rfind(char::is_whitespace)
        .filter(|pos| *pos > 0)
        .unwrap_or(cut);
    format!("{}{TRUNCATION_MARKER}", head[..end].trim_end())
}
