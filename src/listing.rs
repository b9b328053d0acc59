//! Turns archive buckets, category buckets, and the whole corpus into
//! [`Listing`]s, and listings into [`PageDescriptor`]s.

use crate::archive::ArchiveBucket;
use crate::category::CategoryBucket;
use crate::config::Config;
use crate::item::ContentItem;
use crate::page::{PageDescriptor, PageKind, INDEX_FILENAME};
use crate::paginate::{self, Paginator};
use crate::util::{directory_url, join_dir, page_dir};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use std::fmt;
use url::Url;

const ITALIAN_MONTHS: [&str; 13] = [
    "None",
    "Gennaio",
    "Febbraio",
    "Marzo",
    "Aprile",
    "Maggio",
    "Giugno",
    "Luglio",
    "Agosto",
    "Settembre",
    "Ottobre",
    "Novembre",
    "Dicembre",
];

/// Month names used in archive titles, indexed by month number. Index 0 is a
/// placeholder so that January is 1. Deserializes from a list of exactly 12
/// names.
#[derive(Clone, Debug, PartialEq)]
pub struct MonthNames(Vec<String>);

impl MonthNames {
    /// Returns the name for `month` (1-12), or the placeholder for anything
    /// else.
    pub fn get(&self, month: u32) -> &str {
        self.0
            .get(month as usize)
            .filter(|_| month >= 1)
            .unwrap_or(&self.0[0])
    }
}

impl Default for MonthNames {
    fn default() -> Self {
        MonthNames(ITALIAN_MONTHS.iter().map(|m| m.to_string()).collect())
    }
}

impl<'de> Deserialize<'de> for MonthNames {
    fn deserialize<D>(deserializer: D) -> std::result::Result<MonthNames, D::Error>
    where
        D: Deserializer<'de>,
    {
        let names = Vec::<String>::deserialize(deserializer)?;
        if names.len() != 12 {
            return Err(D::Error::custom(format!(
                "expected 12 month names, found {}",
                names.len()
            )));
        }
        let mut table = Vec::with_capacity(13);
        table.push(ITALIAN_MONTHS[0].to_owned());
        table.extend(names);
        Ok(MonthNames(table))
    }
}

/// A group of items destined for one or more listing pages.
#[derive(Clone, Debug)]
pub struct Listing<'a> {
    pub kind: PageKind,

    /// The directory of the first page. Later pages live under
    /// `{directory}/page/{n}`.
    pub directory: String,

    pub layout: String,
    pub title: String,
    pub description: String,

    /// The items, already in display order.
    pub items: Vec<&'a ContentItem>,
}

impl<'a> Listing<'a> {
    /// Builds the listing for an archive bucket. Titles read like
    /// `Archive: 2023 » Gennaio » 05` and descriptions like
    /// `Archive: 2023/01/05`.
    pub fn archive(bucket: ArchiveBucket<'a>, config: &Config) -> Listing<'a> {
        let key = bucket.key;
        let mut title = format!("{}{}", config.archive_title_prefix, key.year);
        let mut description = format!("{}{}", config.archive_description_prefix, key.year);
        if let Some(month) = key.month {
            title.push_str(&format!(" » {}", config.month_names.get(month)));
            description.push_str(&format!("/{:02}", month));
        }
        if let Some(day) = key.day {
            title.push_str(&format!(" » {:02}", day));
            description.push_str(&format!("/{:02}", day));
        }

        let kind = match (key.month, key.day) {
            (Some(month), Some(day)) => PageKind::ArchiveDay {
                year: key.year,
                month,
                day,
            },
            (Some(month), None) => PageKind::ArchiveMonth {
                year: key.year,
                month,
            },
            _ => PageKind::ArchiveYear { year: key.year },
        };

        Listing {
            kind,
            directory: key.directory(),
            layout: key.granularity().layout().to_owned(),
            title,
            description,
            items: bucket.items,
        }
    }

    /// Builds the listing for a category, rooted at
    /// `/{category_root_directory}/{slug}`.
    pub fn category(bucket: CategoryBucket<'a>, config: &Config) -> Listing<'a> {
        let root = join_dir("/", &config.category_root_directory);
        Listing {
            directory: join_dir(&root, &bucket.slug),
            layout: CATEGORY_LAYOUT.to_owned(),
            title: format!("{}{}", config.category_title_prefix, bucket.label),
            description: format!("{}{}", config.category_description_prefix, bucket.label),
            kind: PageKind::Category {
                category: bucket.label,
                slug: bucket.slug,
            },
            items: bucket.items,
        }
    }

    /// Builds the main index over `items`, rooted at `directory`.
    pub fn index(items: Vec<&'a ContentItem>, directory: &str, config: &Config) -> Listing<'a> {
        Listing {
            kind: PageKind::Generic,
            directory: directory.to_owned(),
            layout: INDEX_LAYOUT.to_owned(),
            title: config.index_title.clone(),
            description: config.index_description.clone(),
            items,
        }
    }

    fn descriptor(
        &self,
        directory: String,
        site_root: Option<&Url>,
    ) -> Result<PageDescriptor<'a>> {
        let url = match site_root {
            None => None,
            Some(root) => {
                let path = join_dir(&directory, INDEX_FILENAME);
                Some(root.join(path.trim_start_matches('/'))?)
            }
        };
        Ok(PageDescriptor {
            kind: self.kind.clone(),
            output_directory: directory,
            output_filename: INDEX_FILENAME,
            layout: self.layout.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            url,
            pager: None,
        })
    }

    /// Splits the listing into pages. The first page always exists, even
    /// when there are no items; with pagination enabled such a page carries
    /// no [`crate::paginate::Pager`]. A `site_root` without a trailing
    /// slash is treated as if it had one.
    pub fn to_pages(
        &self,
        paginator: &Paginator,
        site_root: Option<&Url>,
    ) -> Result<Vec<PageDescriptor<'a>>> {
        let site_root = site_root.map(directory_url);
        let site_root = site_root.as_ref();
        let total_pages = paginator.page_count(self.items.len());
        let mut pages = vec![self.descriptor(self.directory.clone(), site_root)?];

        for page_number in 1..=total_pages {
            let pager = paginator.pager(&self.items, page_number, total_pages, &self.directory)?;
            if page_number > 1 {
                let directory = page_dir(&self.directory, page_number);
                let mut page = self.descriptor(directory, site_root)?;
                page.pager = Some(pager);
                pages.push(page);
            } else {
                pages[0].pager = Some(pager);
            }
        }

        Ok(pages)
    }
}

/// The layout for category pages.
pub const CATEGORY_LAYOUT: &str = "category_index";

/// The layout for the main index.
pub const INDEX_LAYOUT: &str = "index";

/// The result of a fallible listing operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error turning a listing into pages.
#[derive(Debug)]
pub enum Error {
    /// Returned when a pager can't be built.
    Paginate(paginate::Error),

    /// Returned when a page URL can't be derived from the site root.
    UrlParse(url::ParseError),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Paginate(err) => err.fmt(f),
            Error::UrlParse(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Paginate(err) => Some(err),
            Error::UrlParse(err) => Some(err),
        }
    }
}

impl From<paginate::Error> for Error {
    fn from(err: paginate::Error) -> Error {
        Error::Paginate(err)
    }
}

impl From<url::ParseError> for Error {
    /// Converts a [`url::ParseError`] into an [`Error`]. It allows us to use
    /// the `?` operator for URL joining.
    fn from(err: url::ParseError) -> Error {
        Error::UrlParse(err)
    }
}
