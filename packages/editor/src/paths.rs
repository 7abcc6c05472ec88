//! Page path slugs.

use blockcraft_schema::Page;

/// Lowercase, strip everything outside `[a-z0-9 -]`, join words with `-`.
pub fn slugify(input: &str) -> String {
    let lowered = input.trim().to_lowercase();
    let kept: String = lowered
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() || *c == '-')
        .collect();

    let mut slug = String::with_capacity(kept.len());
    for c in kept.chars() {
        let c = if c.is_whitespace() { '-' } else { c };
        if c == '-' && slug.ends_with('-') {
            continue;
        }
        slug.push(c);
    }
    slug
}

/// `/slug`, suffixed `-2`, `-3`, ... until no other page owns it.
///
/// `exclude_id` is the page being renamed; its own current path never
/// counts as a collision.
pub fn unique_path(slug: &str, pages: &[Page], exclude_id: Option<&str>) -> String {
    let base = if slug.is_empty() { "page" } else { slug };
    let taken: Vec<&str> = pages
        .iter()
        .filter(|p| Some(p.id.as_str()) != exclude_id)
        .map(|p| p.path.as_str())
        .collect();

    let mut candidate = format!("/{}", base);
    let mut n = 2;
    while taken.contains(&candidate.as_str()) {
        candidate = format!("/{}-{}", base, n);
        n += 1;
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Home"), "home");
        assert_eq!(slugify("  About   Us "), "about-us");
        assert_eq!(slugify("Pricing & Plans!"), "pricing-plans");
        assert_eq!(slugify("a -- b"), "a-b");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_unique_path_suffixes() {
        let pages = vec![
            Page::new("a", "Foo", "/foo"),
            Page::new("b", "Foo", "/foo-2"),
        ];
        assert_eq!(unique_path("foo", &pages, None), "/foo-3");
        assert_eq!(unique_path("bar", &pages, None), "/bar");
        assert_eq!(unique_path("", &pages, None), "/page");
    }

    #[test]
    fn test_unique_path_ignores_self() {
        let pages = vec![Page::new("a", "Foo", "/foo")];
        assert_eq!(unique_path("foo", &pages, Some("a")), "/foo");
    }
}
