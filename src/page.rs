//! Defines [`PageDescriptor`], the renderer-ready description of one listing
//! page.

use crate::item::ContentItem;
use crate::paginate::Pager;
use serde::Serialize;
use url::Url;

/// Every listing page is written to `{output_directory}/index.html`.
pub const INDEX_FILENAME: &str = "index.html";

/// The kind of listing a page belongs to, along with the fields specific to
/// that kind.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum PageKind {
    ArchiveYear { year: i32 },
    ArchiveMonth { year: i32, month: u32 },
    ArchiveDay { year: i32, month: u32, day: u32 },
    Category { category: String, slug: String },
    Generic,
}

/// One output page of a listing. Pages are built by
/// [`crate::listing::Listing::to_pages`].
#[derive(Clone, Debug, Serialize)]
pub struct PageDescriptor<'a> {
    /// The listing kind and its metadata.
    pub kind: PageKind,

    /// The site-relative directory the page is written to, e.g.,
    /// `/2023/01/page/2`.
    pub output_directory: String,

    /// Always [`INDEX_FILENAME`].
    pub output_filename: &'static str,

    /// The template the renderer should use.
    pub layout: String,

    pub title: String,

    pub description: String,

    /// The absolute URL of the page, when the site root is known.
    pub url: Option<Url>,

    /// The items and navigation for this page. `None` for a listing with no
    /// items and pagination enabled; the renderer shows no navigation and
    /// nothing to iterate over in that case.
    pub pager: Option<Pager<&'a ContentItem>>,
}

impl PageDescriptor<'_> {
    /// The site-relative path of the output file.
    pub fn output_path(&self) -> String {
        crate::util::join_dir(&self.output_directory, self.output_filename)
    }
}
