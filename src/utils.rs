pub fn strip_ansi(s: &str) -> String {
    strip_ansi_escapes::strip(s)
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .unwrap_or_else(|| s.to_string())
}

/// Remove terminal escape/control sequences and surrounding whitespace, as
/// needed for raw prompt output.
pub fn cleanse_ansi(s: &str) -> String {
    strip_ansi(s).trim().to_string()
}
