use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Named regions of a pasted note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    /// Lines before any recognized header.
    Default,
    Patient,
    Insurance,
    Provider,
    Encounter,
    Emergency,
}

/// Header patterns, tried in order against a whole line. Optional markdown
/// decoration and a trailing colon are allowed.
static SECTION_HEADERS: LazyLock<Vec<(SectionKind, Regex)>> = LazyLock::new(|| {
    [
        (
            SectionKind::Emergency,
            r"emergency\s+contacts?(?:\s+(?:information|info|details))?",
        ),
        (
            SectionKind::Patient,
            r"patient(?:\s+(?:information|info|demographics|details|contact(?:\s+information)?))?|demographics|contact\s+information",
        ),
        (
            SectionKind::Insurance,
            r"(?:primary\s+|secondary\s+)?insurance(?:\s+(?:information|info|details|coverage))?|coverage(?:\s+information)?|payer(?:\s+information)?",
        ),
        (
            SectionKind::Provider,
            r"(?:referring\s+|ordering\s+|attending\s+)?(?:provider|physician)(?:\s+(?:information|info|details))?",
        ),
        (
            SectionKind::Encounter,
            r"encounter(?:\s+(?:information|info|details))?|visit(?:\s+(?:information|info|details))?|clinical\s+information",
        ),
    ]
    .into_iter()
    .map(|(kind, body)| {
        let pattern = format!(r"(?i)^[#*\s]*(?:{body})\s*[:\-]?[\s*#]*$");
        (kind, Regex::new(&pattern).unwrap())
    })
    .collect()
});

static SPACE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t\u{A0}]+").unwrap());

/// Unify line endings, collapse horizontal whitespace, trim lines, drop blanks.
pub fn normalize_lines(text: &str) -> Vec<String> {
    text.replace("\r\n", "\n")
        .replace('\r', "\n")
        .lines()
        .map(|line| SPACE_RUNS.replace_all(line, " ").trim().to_string())
        .filter(|line| !line.is_empty())
        .collect()
}

pub fn section_header(line: &str) -> Option<SectionKind> {
    SECTION_HEADERS
        .iter()
        .find(|(_, regex)| regex.is_match(line))
        .map(|(kind, _)| *kind)
}

/// Group lines under the most recent header. Sections come back in order of
/// first appearance; a repeated header appends to its earlier section. The
/// default bucket is present only when it holds lines.
pub fn split_sections(text: &str) -> Vec<(SectionKind, Vec<String>)> {
    let mut sections: Vec<(SectionKind, Vec<String>)> = vec![(SectionKind::Default, Vec::new())];
    let mut current = 0;

    for line in normalize_lines(text) {
        if let Some(kind) = section_header(&line) {
            current = match sections.iter().position(|(k, _)| *k == kind) {
                Some(index) => index,
                None => {
                    sections.push((kind, Vec::new()));
                    sections.len() - 1
                }
            };
            continue;
        }
        sections[current].1.push(line);
    }

    sections.retain(|(kind, lines)| *kind != SectionKind::Default || !lines.is_empty());
    sections
}

/// Lines of one section joined back into text, if the section exists.
pub fn section_text(sections: &[(SectionKind, Vec<String>)], kind: SectionKind) -> Option<String> {
    sections
        .iter()
        .find(|(k, _)| *k == kind)
        .map(|(_, lines)| lines.join("\n"))
        .filter(|text| !text.is_empty())
}

/// Lines of every section whose kind is in `kinds`, in document order.
pub fn sections_text(sections: &[(SectionKind, Vec<String>)], kinds: &[SectionKind]) -> Option<String> {
    let lines: Vec<&str> = sections
        .iter()
        .filter(|(kind, _)| kinds.contains(kind))
        .flat_map(|(_, lines)| lines.iter().map(String::as_str))
        .collect();
    (!lines.is_empty()).then(|| lines.join("\n"))
}
