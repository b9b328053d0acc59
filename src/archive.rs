//! Files [`ContentItem`]s into a year → month → day hierarchy and derives
//! the chronological [`ArchiveBucket`]s from it.
//!
//! Every bucket lists its items most-recent-first. Day buckets are built
//! first by reversing each day's items; month and year buckets are the
//! concatenation of their children's already-reversed items, walked in
//! descending key order. No level is re-sorted.

use crate::item::ContentItem;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Items grouped by year, month, and day. Keys iterate in ascending order;
/// items within a day are in corpus order.
pub type Archive<'a> = BTreeMap<i32, BTreeMap<u32, BTreeMap<u32, Vec<&'a ContentItem>>>>;

/// Groups `items` by publish date in a single pass.
pub fn bucketize(items: &[ContentItem]) -> Archive<'_> {
    let mut archive = Archive::new();
    for item in items {
        let (year, month, day) = item.ymd();
        archive
            .entry(year)
            .or_default()
            .entry(month)
            .or_default()
            .entry(day)
            .or_default()
            .push(item);
    }
    archive
}

/// The temporal grain of an [`ArchiveBucket`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Daily,
    Monthly,
    Yearly,
}

impl Granularity {
    /// The layout a granularity's pages are rendered with.
    pub fn layout(self) -> &'static str {
        match self {
            Granularity::Daily => "archive_daily",
            Granularity::Monthly => "archive_monthly",
            Granularity::Yearly => "archive_yearly",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Granularity::Daily => write!(f, "daily"),
            Granularity::Monthly => write!(f, "monthly"),
            Granularity::Yearly => write!(f, "yearly"),
        }
    }
}

/// Identifies an archive bucket. `month` is set for monthly and daily
/// buckets; `day` only for daily ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArchiveKey {
    pub year: i32,
    pub month: Option<u32>,
    pub day: Option<u32>,
}

impl ArchiveKey {
    pub fn granularity(&self) -> Granularity {
        match (self.month, self.day) {
            (Some(_), Some(_)) => Granularity::Daily,
            (Some(_), None) => Granularity::Monthly,
            _ => Granularity::Yearly,
        }
    }

    /// The canonical output directory: `/{yyyy}`, `/{yyyy}/{mm}`, or
    /// `/{yyyy}/{mm}/{dd}`.
    pub fn directory(&self) -> String {
        let mut dir = format!("/{:04}", self.year);
        if let Some(month) = self.month {
            dir.push_str(&format!("/{:02}", month));
            if let Some(day) = self.day {
                dir.push_str(&format!("/{:02}", day));
            }
        }
        dir
    }
}

/// A group of items sharing a year, month, or day, most recent first.
#[derive(Clone, Debug)]
pub struct ArchiveBucket<'a> {
    pub key: ArchiveKey,
    pub items: Vec<&'a ContentItem>,
}

/// Derives buckets from an [`Archive`]. Aggregation always happens at every
/// level, but a bucket is only emitted when `materialize` returns `true` for
/// its granularity. Years, months, and days are visited newest first; each
/// year's day and month buckets precede the year bucket.
pub fn buckets<'a>(
    archive: &Archive<'a>,
    materialize: impl Fn(Granularity) -> bool,
) -> Vec<ArchiveBucket<'a>> {
    let mut buckets = Vec::new();
    for (&year, months) in archive.iter().rev() {
        let mut year_items = Vec::new();
        for (&month, days) in months.iter().rev() {
            let mut month_items = Vec::new();
            for (&day, items) in days.iter().rev() {
                let day_items: Vec<&ContentItem> = items.iter().rev().copied().collect();
                month_items.extend(day_items.iter().copied());
                if materialize(Granularity::Daily) {
                    buckets.push(ArchiveBucket {
                        key: ArchiveKey {
                            year,
                            month: Some(month),
                            day: Some(day),
                        },
                        items: day_items,
                    });
                }
            }
            year_items.extend(month_items.iter().copied());
            if materialize(Granularity::Monthly) {
                buckets.push(ArchiveBucket {
                    key: ArchiveKey {
                        year,
                        month: Some(month),
                        day: None,
                    },
                    items: month_items,
                });
            }
        }
        if materialize(Granularity::Yearly) {
            buckets.push(ArchiveBucket {
                key: ArchiveKey {
                    year,
                    month: None,
                    day: None,
                },
                items: year_items,
            });
        }
    }
    buckets
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::item::fixture;
    use pretty_assertions::assert_eq;

    fn corpus() -> Vec<ContentItem> {
        vec![
            fixture("a", "2022-12-31", &[]),
            fixture("b", "2023-01-05", &[]),
            fixture("c", "2023-01-20", &[]),
            fixture("d", "2023-01-20", &[]),
            fixture("e", "2023-02-01", &[]),
        ]
    }

    fn ids(items: &[&ContentItem]) -> Vec<String> {
        items.iter().map(|i| i.id.clone()).collect()
    }

    fn find<'a, 'b>(
        buckets: &'b [ArchiveBucket<'a>],
        dir: &str,
    ) -> &'b ArchiveBucket<'a> {
        buckets
            .iter()
            .find(|b| b.key.directory() == dir)
            .unwrap_or_else(|| panic!("no bucket {}", dir))
    }

    #[test]
    fn test_bucketize() {
        let corpus = corpus();
        let archive = bucketize(&corpus);
        assert_eq!(vec![2022, 2023], archive.keys().copied().collect::<Vec<_>>());
        assert_eq!(ids(&archive[&2023][&1][&20]), vec!["c", "d"]);
    }

    #[test]
    fn test_levels_are_reverse_chronological() {
        let corpus = corpus();
        let buckets = buckets(&bucketize(&corpus), |_| true);
        assert_eq!(ids(&find(&buckets, "/2023").items), vec!["e", "d", "c", "b"]);
        assert_eq!(ids(&find(&buckets, "/2023/01").items), vec!["d", "c", "b"]);
        assert_eq!(ids(&find(&buckets, "/2023/01/20").items), vec!["d", "c"]);
        assert_eq!(ids(&find(&buckets, "/2022").items), vec!["a"]);

        for bucket in &buckets {
            for pair in bucket.items.windows(2) {
                assert!(pair[0].date >= pair[1].date);
            }
        }
    }

    #[test]
    fn test_containment() {
        let corpus = corpus();
        let buckets = buckets(&bucketize(&corpus), |_| true);
        for day in buckets.iter().filter(|b| b.key.granularity() == Granularity::Daily) {
            let month = find(&buckets, &ArchiveKey { day: None, ..day.key }.directory());
            let year = find(
                &buckets,
                &ArchiveKey {
                    month: None,
                    day: None,
                    ..day.key
                }
                .directory(),
            );
            for item in &day.items {
                assert!(month.items.contains(item));
                assert!(year.items.contains(item));
            }
        }
    }

    #[test]
    fn test_emission_order() {
        let corpus = corpus();
        let dirs: Vec<String> = buckets(&bucketize(&corpus), |_| true)
            .iter()
            .map(|b| b.key.directory())
            .collect();
        assert_eq!(
            dirs,
            vec![
                "/2023/02/01",
                "/2023/02",
                "/2023/01/20",
                "/2023/01/05",
                "/2023/01",
                "/2023",
                "/2022/12/31",
                "/2022/12",
                "/2022",
            ]
        );
    }

    #[test]
    fn test_materialize_filters_granularities() {
        let corpus = corpus();
        let buckets = buckets(&bucketize(&corpus), |g| g == Granularity::Yearly);
        assert_eq!(2, buckets.len());
        assert_eq!(4, find(&buckets, "/2023").items.len());
    }

    #[test]
    fn test_deterministic() {
        let corpus = corpus();
        let first: Vec<(String, Vec<String>)> = buckets(&bucketize(&corpus), |_| true)
            .iter()
            .map(|b| (b.key.directory(), ids(&b.items)))
            .collect();
        let second: Vec<(String, Vec<String>)> = buckets(&bucketize(&corpus), |_| true)
            .iter()
            .map(|b| (b.key.directory(), ids(&b.items)))
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_directory_padding() {
        let key = ArchiveKey {
            year: 987,
            month: Some(3),
            day: Some(7),
        };
        assert_eq!("/0987/03/07", key.directory());
        assert_eq!(Granularity::Daily, key.granularity());
    }
}
