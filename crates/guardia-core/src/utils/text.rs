/// Fold a single character for comparisons: upper-case, accents removed.
/// Always maps one char to one char so folded and original strings share
/// char offsets.
pub fn fold_char(c: char) -> char {
    let upper = c.to_uppercase().next().unwrap_or(c);
    match upper {
        'Á' | 'À' | 'Â' | 'Ä' => 'A',
        'É' | 'È' | 'Ê' | 'Ë' => 'E',
        'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
        'Ó' | 'Ò' | 'Ô' | 'Ö' => 'O',
        'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
        other => other,
    }
}

/// Case- and accent-insensitive form of a string
pub fn fold(s: &str) -> String {
    s.chars().map(fold_char).collect()
}

/// Case- and accent-insensitive equality
pub fn eq_folded(a: &str, b: &str) -> bool {
    a.chars().count() == b.chars().count()
        && a.chars().zip(b.chars()).all(|(x, y)| fold_char(x) == fold_char(y))
}

/// Case- and accent-insensitive substring test
pub fn contains_folded(haystack: &str, needle: &str) -> bool {
    fold(haystack).contains(&fold(needle))
}

/// If `text` starts with `prefix` (folded comparison), return the rest of the
/// original text.
pub fn strip_prefix_folded<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let mut chars = text.char_indices();
    for p in prefix.chars() {
        let (_, c) = chars.next()?;
        if fold_char(c) != fold_char(p) {
            return None;
        }
    }
    let rest_start = chars.next().map(|(i, _)| i).unwrap_or(text.len());
    Some(&text[rest_start..])
}

/// Like [`strip_prefix_folded`], but the prefix must end on a word boundary.
pub fn strip_word_prefix_folded<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = strip_prefix_folded(text, prefix)?;
    match rest.chars().next() {
        None => Some(rest),
        Some(c) if c.is_alphanumeric() => None,
        Some(_) => Some(rest),
    }
}

/// Remove trailing `.` and `-` (and the whitespace around them)
pub fn trim_trailing_dots(s: &str) -> &str {
    s.trim()
        .trim_end_matches(|c: char| c == '.' || c == '-' || c == '–' || c.is_whitespace())
}

/// Remove surrounding straight or typographic quote characters
pub fn strip_quotes(s: &str) -> &str {
    s.trim()
        .trim_matches(|c: char| matches!(c, '"' | '\'' | '“' | '”' | '«' | '»' | '‘' | '’'))
        .trim()
}

/// Remove one trailing parenthetical, e.g. `"Juan Pérez (detalle)"`
pub fn strip_trailing_parenthetical(s: &str) -> &str {
    let trimmed = s.trim_end();
    if trimmed.ends_with(')') {
        if let Some(open) = trimmed.rfind('(') {
            return trimmed[..open].trim_end();
        }
    }
    trimmed
}

/// Remove trailing punctuation left over after a name
pub fn trim_trailing_punctuation(s: &str) -> &str {
    s.trim_end_matches(|c: char| matches!(c, '.' | ',' | ';' | ':' | '-' | '–') || c.is_whitespace())
        .trim_start()
}

/// True when the text is entirely upper-case and contains at least one letter
pub fn is_upper_case(s: &str) -> bool {
    s.chars().any(char::is_alphabetic) && s.chars().all(|c| !c.is_lowercase())
}

/// Join the non-empty parts with a single space
pub fn join_non_empty<'a, I>(parts: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    parts
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
