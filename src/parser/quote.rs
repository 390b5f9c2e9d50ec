/// Collect the quoted run starting at `start` and strip one level of quoting.
///
/// The run continues over lines starting with `>` and over blank lines
/// between them, so a quote can hold several paragraphs. Trailing blank lines
/// are left for the caller. Returns the dequoted lines and the index of the
/// first line not consumed.
pub fn quoted_run(lines: &[String], start: usize) -> (Vec<String>, usize) {
    let mut end = start;
    let mut i = start;

    while i < lines.len() {
        let line = lines[i].trim_start();
        if line.starts_with('>') {
            end = i + 1;
        } else if !line.is_empty() {
            break;
        }
        i += 1;
    }

    let inner = lines[start..end]
        .iter()
        .map(|line| strip_marker(line).to_string())
        .collect();
    (inner, end)
}

/// Remove one `>` and at most one space after it.
fn strip_marker(line: &str) -> &str {
    let line = line.trim_start();
    match line.strip_prefix('>') {
        Some(rest) => rest.strip_prefix(' ').unwrap_or(rest),
        None => "",
    }
}
