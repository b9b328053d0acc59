//! Exports the [`generate`] function which stitches together the steps of
//! building listing pages: filing the corpus into archive and category
//! buckets, wrapping each bucket in a [`Listing`], and paginating every
//! listing into [`PageDescriptor`]s.

use crate::archive::{self, Granularity};
use crate::category;
use crate::config::Config;
use crate::item::ContentItem;
use crate::listing::{self, Listing, CATEGORY_LAYOUT, INDEX_LAYOUT};
use crate::page::PageDescriptor;
use crate::paginate::Paginator;
use std::collections::HashSet;
use std::fmt;

/// The output of [`generate`].
#[derive(Debug)]
pub struct Generated<'a> {
    /// Every listing page, in generation order: the main index, then the
    /// archives (newest first), then the categories.
    pub pages: Vec<PageDescriptor<'a>>,

    /// Listing types that were requested but skipped because the renderer
    /// doesn't provide their layout.
    pub skipped: Vec<MissingLayout>,
}

/// A listing type that was requested but whose layout is unavailable. The
/// listing type is skipped; the rest of the run is unaffected.
#[derive(Clone, Debug, PartialEq)]
pub struct MissingLayout {
    /// What was skipped, e.g. `daily archive`.
    pub listing: String,
    pub layout: String,
}

impl fmt::Display for MissingLayout {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "skipping {} pages: layout `{}` is not available",
            self.listing, self.layout
        )
    }
}

/// Builds the listing pages for `corpus`. The function is pure: the same
/// corpus and config always produce the same pages.
pub fn generate<'a>(corpus: &'a [ContentItem], config: &Config) -> Result<Generated<'a>> {
    let mut skipped = Vec::new();
    let mut listings: Vec<Listing<'a>> = Vec::new();

    // main index
    if let Some(dir) = &config.index_directory {
        if require_layout(config, "index", INDEX_LAYOUT, &mut skipped) {
            let mut items: Vec<&ContentItem> = corpus.iter().collect();
            items.sort_by(|a, b| b.cmp(a));
            listings.push(Listing::index(items, dir, config));
        }
    }

    // archives
    let materialized: HashSet<Granularity> = config
        .enabled_granularities
        .iter()
        .copied()
        .filter(|g| require_layout(config, &format!("{} archive", g), g.layout(), &mut skipped))
        .collect();
    if !materialized.is_empty() {
        let archive = archive::bucketize(corpus);
        listings.extend(
            archive::buckets(&archive, |g| materialized.contains(&g))
                .into_iter()
                .map(|bucket| Listing::archive(bucket, config)),
        );
    }

    // categories
    let index = category::index_by_category(corpus);
    if !(index.is_empty() && config.categories.is_empty())
        && require_layout(config, "category", CATEGORY_LAYOUT, &mut skipped)
    {
        listings.extend(
            category::category_buckets(index, &config.categories)
                .into_iter()
                .map(|bucket| Listing::category(bucket, config)),
        );
    }

    let paginator = Paginator::new(config.page_size);
    let mut pages = Vec::new();
    for listing in &listings {
        let listing_pages = listing.to_pages(&paginator, config.site_root.as_ref())?;
        tracing::debug!(
            directory = %listing.directory,
            layout = %listing.layout,
            items = listing.items.len(),
            pages = listing_pages.len(),
            "Paginated listing"
        );
        pages.extend(listing_pages);
    }

    check_unique_paths(&pages)?;
    tracing::info!(
        listings = listings.len(),
        pages = pages.len(),
        skipped = skipped.len(),
        "Generated listing pages"
    );
    Ok(Generated { pages, skipped })
}

fn require_layout(
    config: &Config,
    listing: &str,
    layout: &str,
    skipped: &mut Vec<MissingLayout>,
) -> bool {
    if config.has_layout(layout) {
        return true;
    }
    let missing = MissingLayout {
        listing: listing.to_owned(),
        layout: layout.to_owned(),
    };
    tracing::warn!(listing = %missing.listing, layout = %missing.layout, "{}", missing);
    skipped.push(missing);
    false
}

fn check_unique_paths(pages: &[PageDescriptor]) -> Result<()> {
    let mut seen: HashSet<String> = HashSet::with_capacity(pages.len());
    for page in pages {
        let path = page.output_path();
        if !seen.insert(path.clone()) {
            return Err(Error::DuplicateOutputPath(path));
        }
    }
    Ok(())
}

/// The result of a fallible generation operation.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for generating pages. Both variants indicate a broken
/// invariant and abort the run.
#[derive(Debug)]
pub enum Error {
    /// Returned when a listing can't be paginated.
    Listing(listing::Error),

    /// Returned when two pages would be written to the same file, e.g.
    /// because two category labels share a slug.
    DuplicateOutputPath(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Listing(err) => err.fmt(f),
            Error::DuplicateOutputPath(path) => {
                write!(f, "more than one page would be written to `{}`", path)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Listing(err) => Some(err),
            Error::DuplicateOutputPath(_) => None,
        }
    }
}

impl From<listing::Error> for Error {
    /// Converts [`listing::Error`]s into [`Error`]. This allows us to use the
    /// `?` operator.
    fn from(err: listing::Error) -> Error {
        Error::Listing(err)
    }
}
