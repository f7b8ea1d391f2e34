//! URL slug generation.

/// Turn a display name into a lowercase ASCII slug.
///
/// Runs of anything that is not an ASCII letter or digit collapse into a
/// single `-`. Names with no usable characters produce `"-"` so the slug is
/// never empty.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    if slug.is_empty() {
        slug.push('-');
    }
    slug
}
