//! Slug derivation
//!
//! Company slugs are derived from the display name: lowercased, alphanumeric
//! runs preserved, everything else collapsed into single hyphens.

/// Derive a URL-safe slug from a display name
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_was_hyphen = true; // suppress leading hyphen

    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    }

    // Drop a trailing hyphen left by non-alphanumeric tail characters
    if slug.ends_with('-') {
        slug.pop();
    }

    slug
}
