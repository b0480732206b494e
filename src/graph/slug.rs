//! Slug derivation from content-relative paths.

/// Route path for a markdown document.
///
/// `index.md` at the content root is `/`; any other path gets a leading `/` with a trailing
/// `/index.md` stripped and then a trailing `.md` stripped.
pub fn derive_slug(relative_path: &str) -> String {
    if relative_path == "index.md" {
        return "/".to_string();
    }
    let slug = format!("/{}", relative_path);
    let slug = slug.strip_suffix("/index.md").unwrap_or(&slug);
    let slug = slug.strip_suffix(".md").unwrap_or(slug);
    slug.to_string()
}

/// Slug of the route one level up: `slug` truncated at its last `/`, or `/`.
pub fn parent_slug(slug: &str) -> &str {
    match slug.rfind('/') {
        Some(0) | None => "/",
        Some(idx) => &slug[..idx],
    }
}
