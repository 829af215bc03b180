//! Whitespace normalization and paragraph reflow.

/// Strip source-layout indentation from a template.
///
/// The first line loses its leading whitespace; every following line loses
/// the indentation shared by all following non-blank lines. Trailing
/// whitespace is dropped from every line, and blank lines at either end are
/// removed. This accepts both layouts authors use for string literals:
///
/// ```text
/// "Input {} should be set to {}. Please adjust
///     your settings and re-run."
///
/// "
///     Input {} should be set to {}. Please adjust
///     your settings and re-run.
/// "
/// ```
pub fn normalize(template: &str) -> String {
    let raw: Vec<&str> = template.lines().map(str::trim_end).collect();

    let indent = raw
        .iter()
        .skip(1)
        .copied()
        .filter(|line| !line.is_empty())
        .map(leading_whitespace)
        .reduce(common_prefix)
        .unwrap_or("");

    let lines: Vec<&str> = raw
        .iter()
        .enumerate()
        .map(|(i, &line)| {
            if i == 0 {
                line.trim_start()
            } else {
                line.strip_prefix(indent).unwrap_or(line)
            }
        })
        .collect();

    let first = lines.iter().position(|line| !line.is_empty());
    let last = lines.iter().rposition(|line| !line.is_empty());
    match (first, last) {
        (Some(first), Some(last)) => lines[first..=last].join("\n"),
        _ => String::new(),
    }
}

/// Rewrap normalized text to `width` columns.
///
/// Paragraphs are separated by blank lines. Within a paragraph, line breaks
/// are collapsed and the words are greedily refilled; a word longer than
/// `width` gets a line of its own and is never split. Preformatted paragraphs
/// are kept as written: every line indented, a first line starting with a
/// `$ ` shell prompt, or any `>>>` interpreter prompt in the paragraph.
/// Paragraphs are joined with a single blank line.
pub fn reflow(text: &str, width: usize) -> String {
    paragraphs(text)
        .iter()
        .map(|lines| {
            if is_preformatted(lines) {
                lines.join("\n")
            } else {
                fill(lines.iter().flat_map(|line| line.split_whitespace()), width)
            }
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn paragraphs(text: &str) -> Vec<Vec<&str>> {
    let mut paragraphs = Vec::new();
    let mut current = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        paragraphs.push(current);
    }

    paragraphs
}

fn is_preformatted(lines: &[&str]) -> bool {
    let indented = lines.iter().all(|line| line.starts_with([' ', '\t']));
    let shell = lines.first().is_some_and(|line| line.starts_with("$ "));
    let session = lines.iter().any(|line| line.contains(">>>"));
    indented || shell || session
}

fn fill<'a>(words: impl Iterator<Item = &'a str>, width: usize) -> String {
    let mut out = String::new();
    let mut line_len = 0;

    for word in words {
        let word_len = word.chars().count();
        if line_len == 0 {
            out.push_str(word);
            line_len = word_len;
        } else if line_len + 1 + word_len <= width {
            out.push(' ');
            out.push_str(word);
            line_len += 1 + word_len;
        } else {
            out.push('\n');
            out.push_str(word);
            line_len = word_len;
        }
    }

    out
}

fn leading_whitespace(line: &str) -> &str {
    let trimmed = line.trim_start_matches([' ', '\t']);
    &line[..line.len() - trimmed.len()]
}

fn common_prefix<'a>(a: &'a str, b: &'a str) -> &'a str {
    let len = a
        .bytes()
        .zip(b.bytes())
        .take_while(|(x, y)| x == y)
        .count();
    &a[..len]
}
