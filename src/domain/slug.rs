/// Lower-case an arbitrary name into a URL slug.
///
/// ASCII letters, digits and underscores are kept. Runs of whitespace and
/// hyphens collapse into a single hyphen, anything else is dropped and
/// leading or trailing separators are trimmed.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_separator = false;

    for ch in input.chars() {
        if ch.is_ascii_alphanumeric() || ch == '_' {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(ch.to_ascii_lowercase());
        } else if ch.is_whitespace() || ch == '-' {
            pending_separator = true;
        }
    }

    slug.trim_matches(|ch| ch == '-' || ch == '_').to_string()
}

/// Find the first free slug among `base`, `base-2`, `base-3`, ...
///
/// `fallback` is used as the base when `name` slugifies to nothing.
/// `is_taken` is asked about each candidate in turn.
pub fn unique_slug<E, F>(name: &str, fallback: &str, mut is_taken: F) -> Result<String, E>
where
    F: FnMut(&str) -> Result<bool, E>,
{
    let mut base = slugify(name);
    if base.is_empty() {
        base = fallback.to_string();
    }

    if !is_taken(&base)? {
        return Ok(base);
    }

    let mut counter = 2u32;
    loop {
        let candidate = format!("{base}-{counter}");
        if !is_taken(&candidate)? {
            return Ok(candidate);
        }
        counter += 1;
    }
}
