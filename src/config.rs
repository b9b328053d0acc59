//! Loads the project configuration from `almanac.yaml`.

use crate::archive::Granularity;
use crate::listing::{MonthNames, CATEGORY_LAYOUT, INDEX_LAYOUT};
use serde::Deserialize;
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};
use url::Url;

/// The name of the project file searched for by [`Config::from_directory`].
pub const PROJECT_FILE: &str = "almanac.yaml";

/// The settings that drive listing generation. Every field has a default, so
/// an empty project file is valid.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Items per listing page. Zero or less disables pagination.
    pub page_size: i64,

    pub archive_title_prefix: String,
    pub archive_description_prefix: String,
    pub category_title_prefix: String,
    pub category_description_prefix: String,

    /// The directory under which category listings live, e.g. `categories`
    /// puts the `rust` category at `/categories/rust`.
    pub category_root_directory: String,

    /// Which archive granularities to generate.
    pub enabled_granularities: Vec<Granularity>,

    /// The layouts the renderer provides. Listing types whose layout is
    /// missing are skipped.
    pub layouts: Vec<String>,

    /// Where the main paginated index lives. `None` disables it.
    pub index_directory: Option<String>,

    pub index_title: String,
    pub index_description: String,

    /// Categories that always get a listing, even with no items.
    pub categories: Vec<String>,

    pub month_names: MonthNames,

    /// When set, every page gets an absolute URL under this root. A missing
    /// trailing slash is added, so `https://example.org/blog` keeps `/blog`.
    pub site_root: Option<Url>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            page_size: 10,
            archive_title_prefix: "Archive: ".to_owned(),
            archive_description_prefix: "Archive: ".to_owned(),
            category_title_prefix: "Category: ".to_owned(),
            category_description_prefix: "Category: ".to_owned(),
            category_root_directory: "categories".to_owned(),
            enabled_granularities: vec![
                Granularity::Daily,
                Granularity::Monthly,
                Granularity::Yearly,
            ],
            layouts: vec![
                Granularity::Daily.layout().to_owned(),
                Granularity::Monthly.layout().to_owned(),
                Granularity::Yearly.layout().to_owned(),
                CATEGORY_LAYOUT.to_owned(),
                INDEX_LAYOUT.to_owned(),
            ],
            index_directory: Some("/".to_owned()),
            index_title: String::new(),
            index_description: String::new(),
            categories: Vec::new(),
            month_names: MonthNames::default(),
            site_root: None,
        }
    }
}

impl Config {
    /// Searches `dir` and then each of its ancestors for [`PROJECT_FILE`]
    /// and loads the first one found.
    pub fn from_directory(dir: &Path) -> Result<Config> {
        let path = dir.join(PROJECT_FILE);
        if path.exists() {
            Config::from_project_file(&path)
        } else {
            match dir.parent() {
                Some(parent) => Config::from_directory(parent),
                None => Err(Error::ProjectFileNotFound),
            }
        }
    }

    /// Loads the configuration from the project file at `path`.
    pub fn from_project_file(path: &Path) -> Result<Config> {
        let file = File::open(path).map_err(|err| Error::OpenProjectFile {
            path: path.to_owned(),
            err,
        })?;
        serde_yaml::from_reader(file).map_err(|err| Error::DeserializeYaml {
            path: path.to_owned(),
            err,
        })
    }

    /// Returns whether the renderer provides `layout`.
    pub fn has_layout(&self, layout: &str) -> bool {
        self.layouts.iter().any(|l| l == layout)
    }
}

/// The result of a fallible configuration operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error loading the configuration.
#[derive(Debug)]
pub enum Error {
    /// Returned when no project file exists in the directory or any of its
    /// ancestors.
    ProjectFileNotFound,

    /// Returned for I/O problems while opening the project file.
    OpenProjectFile { path: PathBuf, err: std::io::Error },

    /// Returned when the project file isn't valid.
    DeserializeYaml {
        path: PathBuf,
        err: serde_yaml::Error,
    },
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::ProjectFileNotFound => write!(
                f,
                "Could not find `{}` in any parent directory",
                PROJECT_FILE
            ),
            Error::OpenProjectFile { path, err } => {
                write!(f, "Opening project file '{}': {}", path.display(), err)
            }
            Error::DeserializeYaml { path, err } => {
                write!(f, "Loading project file '{}': {}", path.display(), err)
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::ProjectFileNotFound => None,
            Error::OpenProjectFile { path: _, err } => Some(err),
            Error::DeserializeYaml { path: _, err } => Some(err),
        }
    }
}
