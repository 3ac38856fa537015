//! Parsing of clang's textual diagnostics.

use crate::{Diagnostic, Severity};

/// Severity markers in the order they are tried at the same position.
const MARKERS: [(&str, Severity); 5] = [
    ("fatal error: ", Severity::Fatal),
    ("error: ", Severity::Error),
    ("warning: ", Severity::Warning),
    ("note: ", Severity::Note),
    ("remark: ", Severity::Note),
];

/// Parse clang's stderr into diagnostics.
///
/// Recognizes lines of the form `file:line:col: severity: message`, as well
/// as driver messages without a location (`clang++: error: ...` or
/// `error: ...`). Source excerpts, caret lines, include stacks and the
/// summary line are skipped.
pub fn parse_diagnostics(stderr: &str) -> Vec<Diagnostic> {
    stderr.lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<Diagnostic> {
    for (marker, severity) in MARKERS {
        if let Some(message) = line.strip_prefix(marker) {
            return Some(Diagnostic::new(severity, message));
        }
    }

    let (index, marker, severity) = MARKERS
        .iter()
        .filter_map(|&(marker, severity)| {
            let needle = format!(": {marker}");
            line.find(&needle)
                .map(|index| (index, needle.len(), severity))
        })
        .min_by_key(|&(index, _, _)| index)?;

    let prefix = &line[..index];
    let (file, line_no) = parse_location(prefix);
    // echoed source lines (`   12 | ...`) are neither a location nor a program name
    if line_no == 0 && prefix.contains(char::is_whitespace) {
        return None;
    }
    let message = &line[index + marker..];
    Some(Diagnostic::new(severity, message).at(file, line_no))
}

/// Split `file:line:col` (column and line optional) into file and line.
fn parse_location(location: &str) -> (String, u32) {
    let mut rest = location;
    let mut numbers = Vec::new();

    for _ in 0..2 {
        let Some((head, tail)) = rest.rsplit_once(':') else {
            break;
        };
        let Ok(n) = tail.parse::<u32>() else {
            break;
        };
        numbers.push(n);
        rest = head;
    }

    (rest.to_string(), numbers.last().copied().unwrap_or(0))
}
