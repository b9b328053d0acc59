//! Groups [`ContentItem`]s by category and derives each category's path
//! segment via [`slugify`].

use crate::item::ContentItem;
use percent_encoding::percent_decode_str;
use regex::Regex;
use std::collections::{BTreeMap, HashSet};
use std::sync::OnceLock;

/// A category and its items, most recent first.
#[derive(Clone, Debug)]
pub struct CategoryBucket<'a> {
    /// The category label as written in the content.
    pub label: String,

    /// The filesystem- and URL-safe form of `label`.
    pub slug: String,

    pub items: Vec<&'a ContentItem>,
}

/// Groups `items` by category label. Labels iterate alphabetically, and each
/// label's items are sorted most recent first (ties broken by id, also
/// descending).
pub fn index_by_category(items: &[ContentItem]) -> BTreeMap<&str, Vec<&ContentItem>> {
    let mut index: BTreeMap<&str, Vec<&ContentItem>> = BTreeMap::new();
    for item in items {
        for category in &item.categories {
            index.entry(category.as_str()).or_default().push(item);
        }
    }
    for items in index.values_mut() {
        items.sort_by(|a, b| b.cmp(a));
    }
    index
}

/// Converts an index into [`CategoryBucket`]s. Labels in `declared` whose
/// slug matches no indexed label still get an (empty) bucket, appended after
/// the indexed ones. Labels that slugify to nothing are skipped, since their
/// page would land on the category root itself.
pub fn category_buckets<'a>(
    index: BTreeMap<&str, Vec<&'a ContentItem>>,
    declared: &[String],
) -> Vec<CategoryBucket<'a>> {
    let mut buckets: Vec<CategoryBucket<'a>> =
        Vec::with_capacity(index.len() + declared.len());
    let mut slugs: HashSet<String> = HashSet::with_capacity(index.len() + declared.len());

    // Indexed labels that share a slug are all kept; the duplicate output
    // path is reported when the pages are generated.
    for (label, items) in index {
        if let Some(slug) = non_empty_slug(label) {
            slugs.insert(slug.clone());
            buckets.push(CategoryBucket {
                label: label.to_owned(),
                slug,
                items,
            });
        }
    }

    for label in declared {
        if let Some(slug) = non_empty_slug(label) {
            if slugs.insert(slug.clone()) {
                buckets.push(CategoryBucket {
                    label: label.clone(),
                    slug,
                    items: Vec::new(),
                });
            }
        }
    }
    buckets
}

fn non_empty_slug(label: &str) -> Option<String> {
    let slug = slugify(label);
    if slug.is_empty() {
        tracing::warn!(category = %label, "Skipping category with an empty slug");
        return None;
    }
    Some(slug)
}

/// Converts a category label into a path segment. The steps run in this
/// order: percent-decode, lowercase, strip HTML entities, turn `.` into `-`,
/// drop everything outside `[a-z0-9 _-]`, collapse whitespace into `-`,
/// collapse runs of `-`, and trim `-` from both ends.
pub fn slugify(label: &str) -> String {
    static ENTITY: OnceLock<Regex> = OnceLock::new();
    static UNSAFE: OnceLock<Regex> = OnceLock::new();
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    static DASHES: OnceLock<Regex> = OnceLock::new();

    let entity = ENTITY.get_or_init(|| Regex::new(r"&.+?;").unwrap());
    let unsafe_chars = UNSAFE.get_or_init(|| Regex::new(r"[^a-z0-9 _-]").unwrap());
    let whitespace = WHITESPACE.get_or_init(|| Regex::new(r"\s+").unwrap());
    let dashes = DASHES.get_or_init(|| Regex::new(r"-+").unwrap());

    let decoded = percent_decode_str(label).decode_utf8_lossy().to_lowercase();
    let s = entity.replace_all(&decoded, "");
    let s = s.replace('.', "-");
    let s = unsafe_chars.replace_all(&s, "");
    let s = whitespace.replace_all(&s, "-");
    let s = dashes.replace_all(&s, "-");
    s.trim_matches('-').to_owned()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::item::fixture;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_slugify() {
        assert_eq!("c-go", slugify("C++ & Go"));
        assert_eq!("rust", slugify("Rust"));
        assert_eq!("node-js", slugify("Node.js"));
        assert_eq!("tom-jerry", slugify("Tom &amp; Jerry"));
        assert_eq!("hello-world", slugify("  --Hello   World--  "));
        assert_eq!("snake_case", slugify("snake_case"));
        assert_eq!("caf", slugify("Café"));
    }

    #[test]
    fn test_slugify_decodes_before_stripping() {
        assert_eq!("a-b", slugify("a%20b"));
        assert_eq!("c", slugify("C%2B%2B"));
        assert_eq!("", slugify("%26lt%3B"));
    }

    #[test]
    fn test_slugify_idempotent() {
        for label in &[
            "C++ & Go",
            "Node.js",
            "Tom &amp; Jerry",
            "a%20b",
            "--x--y--",
            "Écrits divers",
            "100% legit",
        ] {
            let once = slugify(label);
            assert_eq!(once, slugify(&once), "label {:?}", label);
        }
    }

    #[test]
    fn test_index_by_category() {
        let corpus = vec![
            fixture("a", "2023-01-05", &["Rust", "Go"]),
            fixture("b", "2023-01-20", &["Rust"]),
            fixture("c", "2023-01-05", &["Rust"]),
            fixture("d", "2022-06-01", &[]),
        ];
        let index = index_by_category(&corpus);
        assert_eq!(vec!["Go", "Rust"], index.keys().copied().collect::<Vec<_>>());
        let rust: Vec<&str> = index["Rust"].iter().map(|i| i.id.as_str()).collect();
        assert_eq!(vec!["b", "c", "a"], rust);
        assert_eq!(1, index["Go"].len());
    }

    #[test]
    fn test_category_buckets_include_declared() {
        let corpus = vec![fixture("a", "2023-01-05", &["Rust"])];
        let declared = vec!["Haskell".to_owned(), "Rust".to_owned(), "Haskell".to_owned()];
        let buckets = category_buckets(index_by_category(&corpus), &declared);
        let summary: Vec<(&str, &str, usize)> = buckets
            .iter()
            .map(|b| (b.label.as_str(), b.slug.as_str(), b.items.len()))
            .collect();
        assert_eq!(vec![("Rust", "rust", 1), ("Haskell", "haskell", 0)], summary);
    }

    #[test]
    fn test_declared_category_matches_by_slug() {
        let corpus = vec![fixture("a", "2023-01-05", &["Rust"])];
        let declared = vec!["rust".to_owned(), "RUST".to_owned()];
        let buckets = category_buckets(index_by_category(&corpus), &declared);
        assert_eq!(1, buckets.len());
        assert_eq!("Rust", buckets[0].label);
        assert_eq!(1, buckets[0].items.len());
    }

    #[test]
    fn test_empty_slug_is_skipped() {
        let corpus = vec![fixture("a", "2023-01-05", &["+++", "Go"])];
        let declared = vec!["&amp;".to_owned()];
        let buckets = category_buckets(index_by_category(&corpus), &declared);
        let slugs: Vec<&str> = buckets.iter().map(|b| b.slug.as_str()).collect();
        assert_eq!(vec!["go"], slugs);
    }
}
