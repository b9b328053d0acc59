//! The library code for `almanac`, which derives the listing pages of a
//! static blog: chronological archives, per-category indexes, and the main
//! paginated index. The work can be broken down into three steps:
//!
//! 1. Grouping content items into buckets, by date ([`crate::archive`]) and by
//!    category ([`crate::category`])
//! 2. Wrapping each bucket in a listing with its directory, title, and
//!    description ([`crate::listing`])
//! 3. Splitting each listing into fixed-size pages ([`crate::paginate`])
//!
//! [`generate::generate`] runs all three and returns one
//! [`page::PageDescriptor`] per output page. Rendering those pages is left to
//! the host pipeline; `almanac` never touches the output directory.
//!
//! Archive pages live at `/{yyyy}`, `/{yyyy}/{mm}`, and `/{yyyy}/{mm}/{dd}`;
//! category pages at `/{category_root_directory}/{slug}`. Every page after
//! the first lives under `{dir}/page/{n}`.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod archive;
pub mod category;
pub mod config;
pub mod generate;
pub mod item;
pub mod listing;
pub mod page;
pub mod paginate;
mod util;

pub use generate::{generate, Generated};
