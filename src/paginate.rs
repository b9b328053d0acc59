//! Splits listings into fixed-size pages. See [`Paginator`] and [`Pager`].

use crate::util::page_dir;
use serde::Serialize;
use std::fmt;

/// Computes the number of pages needed for `item_count` items at
/// `page_size` items per page. A `page_size` of zero or less disables
/// pagination: everything goes on one page. Zero items on a paginated
/// listing yield zero pages.
pub fn calculate_page_count(item_count: usize, page_size: i64) -> usize {
    if page_size <= 0 {
        return 1;
    }
    let page_size = page_size as usize;
    match item_count % page_size {
        0 => item_count / page_size,
        _ => item_count / page_size + 1,
    }
}

/// Builds the [`Pager`] for page `page_number` (1-based) of a listing whose
/// first page lives at `directory`. Fails if `page_number` isn't in
/// `1..=total_pages`.
pub fn build_pager<T: Clone>(
    page_size: i64,
    items: &[T],
    page_number: usize,
    total_pages: usize,
    directory: &str,
) -> Result<Pager<T>> {
    if page_number < 1 || page_number > total_pages {
        return Err(Error::PageOutOfRange {
            directory: directory.to_owned(),
            page_number,
            total_pages,
        });
    }

    let slice = match page_size <= 0 {
        true => items,
        false => {
            let page_size = page_size as usize;
            let start = ((page_number - 1) * page_size).min(items.len());
            let stop = (page_number * page_size).min(items.len());
            &items[start..stop]
        }
    };

    Ok(Pager {
        page_number,
        total_pages,
        items: slice.to_vec(),
        previous_page_path: match page_number > 1 {
            false => None,
            true => Some(page_dir(directory, page_number - 1)),
        },
        next_page_path: match page_number < total_pages {
            false => None,
            true => Some(page_dir(directory, page_number + 1)),
        },
    })
}

/// The slice-and-navigation data for one page of a listing.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Pager<T> {
    /// The 1-based number of this page.
    pub page_number: usize,

    /// The number of pages in the listing. Identical for every page of one
    /// listing.
    pub total_pages: usize,

    /// The items on this page.
    pub items: Vec<T>,

    /// The directory of the previous page, if any.
    pub previous_page_path: Option<String>,

    /// The directory of the next page, if any.
    pub next_page_path: Option<String>,
}

/// Carries the configured page size. A page size of zero or less disables
/// pagination.
#[derive(Clone, Copy, Debug)]
pub struct Paginator {
    pub page_size: i64,
}

impl Paginator {
    pub fn new(page_size: i64) -> Paginator {
        Paginator { page_size }
    }

    pub fn page_count(&self, item_count: usize) -> usize {
        calculate_page_count(item_count, self.page_size)
    }

    pub fn pager<T: Clone>(
        &self,
        items: &[T],
        page_number: usize,
        total_pages: usize,
        directory: &str,
    ) -> Result<Pager<T>> {
        build_pager(self.page_size, items, page_number, total_pages, directory)
    }
}

/// The result of a fallible pagination operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents a pagination error. These are programming errors, never the
/// result of bad input.
#[derive(Debug, PartialEq)]
pub enum Error {
    /// Returned when a pager is requested for a page that doesn't exist.
    PageOutOfRange {
        directory: String,
        page_number: usize,
        total_pages: usize,
    },
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::PageOutOfRange {
                directory,
                page_number,
                total_pages,
            } => write!(
                f,
                "page {} of listing `{}` is out of range (1..={})",
                page_number, directory, total_pages
            ),
        }
    }
}

impl std::error::Error for Error {}
