//! Defines the [`ContentItem`] type and [`parse_corpus`], which reads a
//! corpus of already-loaded items from YAML. Parsing source documents is the
//! host pipeline's job; the corpus file is simply its serialized output.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::io::Read;

/// A dated, categorizable unit of content. Items are never mutated once
/// they've been loaded.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct ContentItem {
    /// The identifier of the item's source, e.g., `2023-01-05-hello`. Used to
    /// break ties between items published on the same day.
    #[serde(default, rename = "Id")]
    pub id: String,

    /// The title of the item.
    #[serde(rename = "Title")]
    pub title: String,

    /// The publish date of the item.
    #[serde(rename = "Date")]
    pub date: NaiveDate,

    /// The category labels associated with the item.
    #[serde(default, rename = "Categories")]
    pub categories: BTreeSet<String>,

    /// The body or summary payload, passed through to the renderer untouched.
    #[serde(default, rename = "Body")]
    pub body: String,
}

impl ContentItem {
    /// The `(year, month, day)` key used to file the item into the archive.
    pub fn ymd(&self) -> (i32, u32, u32) {
        (self.date.year(), self.date.month(), self.date.day())
    }
}

impl Ord for ContentItem {
    /// Items are ordered by date and then by id.
    fn cmp(&self, other: &Self) -> Ordering {
        self.date
            .cmp(&other.date)
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl PartialOrd for ContentItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Reads a YAML sequence of [`ContentItem`]s, e.g.:
///
/// ```yaml
/// - Id: hello
///   Title: Hello, world!
///   Date: 2021-04-16
///   Categories: [greet]
/// ```
///
/// The corpus order is preserved.
pub fn parse_corpus<R: Read>(r: R) -> Result<Vec<ContentItem>> {
    Ok(serde_yaml::from_reader(r)?)
}

/// Represents the result of a corpus-parse operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error parsing a corpus.
#[derive(Debug)]
pub enum Error {
    /// Returned when the corpus isn't a valid YAML sequence of items.
    DeserializeYaml(serde_yaml::Error),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::DeserializeYaml(err) => write!(f, "parsing corpus: {}", err),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::DeserializeYaml(err) => Some(err),
        }
    }
}

impl From<serde_yaml::Error> for Error {
    /// Converts a [`serde_yaml::Error`] into an [`Error`]. It allows us to use
    /// the `?` operator for [`serde_yaml`] deserialization functions.
    fn from(err: serde_yaml::Error) -> Error {
        Error::DeserializeYaml(err)
    }
}

/// Builds an item for tests. `date` is `YYYY-MM-DD`.
#[cfg(test)]
pub(crate) fn fixture(id: &str, date: &str, categories: &[&str]) -> ContentItem {
    ContentItem {
        id: id.to_owned(),
        title: id.to_owned(),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        categories: categories.iter().map(|c| c.to_string()).collect(),
        body: String::new(),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_corpus() -> Result<()> {
        let input = r#"
- Id: first
  Title: First
  Date: 2023-01-05
  Categories: [Rust, "C++ & Go"]
  Body: Hello
- Title: Second
  Date: 2023-02-01
"#;
        let items = parse_corpus(input.as_bytes())?;
        assert_eq!(2, items.len());
        assert_eq!("first", items[0].id);
        assert_eq!((2023, 1, 5), items[0].ymd());
        assert!(items[0].categories.contains("C++ & Go"));
        assert_eq!("", items[1].id);
        assert!(items[1].categories.is_empty());
        assert_eq!("", items[1].body);
        Ok(())
    }

    #[test]
    fn test_parse_corpus_rejects_bad_date() {
        let input = "- Title: Bad\n  Date: 2023-13-40\n";
        assert!(matches!(
            parse_corpus(input.as_bytes()),
            Err(Error::DeserializeYaml(_))
        ));
    }

    #[test]
    fn test_ordering_breaks_ties_by_id() {
        let a = fixture("a", "2023-01-05", &[]);
        let b = fixture("b", "2023-01-05", &[]);
        let c = fixture("a", "2023-01-06", &[]);
        assert!(a < b);
        assert!(b < c);
    }
}
