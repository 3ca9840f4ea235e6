use std::collections::HashMap;

/// Parses raw CSV text into rows keyed by the header line's field names.
///
/// Letterboxd exports quote fields containing commas and escape embedded
/// quotes by doubling them; this parser handles exactly that dialect and
/// nothing more. Blank lines are skipped, every field is trimmed, and rows
/// shorter than the header are padded with empty fields. Input without a
/// header and at least one data row yields an empty vec; the caller decides
/// whether that is an error.
pub fn parse_rows(content: &str) -> Vec<HashMap<String, String>> {
    let mut lines = content.lines().filter(|line| !line.trim().is_empty());

    let Some(header_line) = lines.next() else {
        return Vec::new();
    };
    let headers = split_line(header_line);

    lines
        .map(|line| {
            let values = split_line(line);
            headers
                .iter()
                .enumerate()
                .map(|(i, header)| {
                    (header.clone(), values.get(i).cloned().unwrap_or_default())
                })
                .collect()
        })
        .collect()
}

/// Splits one CSV line, honoring double-quoted fields with `""` escapes.
fn split_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }

    fields.push(current.trim().to_string());
    fields
}
