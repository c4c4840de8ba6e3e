/// Pick the JSON candidate out of free-form model text.
///
/// Order of preference: a fenced code block, then the first balanced
/// top-level `{...}` span, then the whole (trimmed) text.
pub fn extract_json_candidate(response: &str) -> &str {
    let region = fenced_block(response).unwrap_or(response);
    first_object_span(region).unwrap_or(region).trim()
}

/// Content of the first ``` fenced block, language tag stripped.
fn fenced_block(text: &str) -> Option<&str> {
    let open = text.find("```")?;
    let after_fence = &text[open + 3..];
    // Language tag runs to end of line.
    let body_start = match after_fence.find('\n') {
        Some(newline) if !after_fence[..newline].contains('{') => newline + 1,
        _ => 0,
    };
    let body = &after_fence[body_start..];
    let close = body.find("```")?;
    let content = body[..close].trim();
    (!content.is_empty()).then_some(content)
}

/// First `{` up to its matching `}`, skipping braces inside JSON strings.
/// Falls back to the last `}` when the braces never balance.
fn first_object_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, c) in text[start..].char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }

    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}
