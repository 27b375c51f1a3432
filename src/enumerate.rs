//! Listing-task enumeration.
//!
//! Generates the full Cartesian product of (year, month, day, dataset)
//! combinations and maps each one onto its listing URL. Days run 1..=31 for
//! every month with no calendar check: listings for dates that do not exist
//! simply come back non-2xx and are absorbed as "nothing here" by the
//! fetcher, which keeps the enumeration trivially deterministic.

/// One listing page to fetch: a (dataset, date) coordinate in the URL space.
///
/// Tasks are derived values with no identity beyond their fields; they are
/// produced lazily by [`enumerate_tasks`] and consumed by a single worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingTask {
    /// Dataset source name (e.g. `tranco`).
    pub dataset: String,
    /// Four-digit year.
    pub year: u16,
    /// Month, 1..=12.
    pub month: u8,
    /// Day, 1..=31 regardless of month length.
    pub day: u8,
}

impl ListingTask {
    /// Renders the listing URL for this task under the given base.
    ///
    /// Month and day are zero-padded to two digits. Pure string work; never
    /// touches the network.
    #[must_use]
    pub fn listing_url(&self, base_url: &str) -> String {
        format!(
            "{}/source={}/year={}/month={:02}/day={:02}/",
            base_url.trim_end_matches('/'),
            self.dataset,
            self.year,
            self.month,
            self.day
        )
    }
}

/// Yields every listing task for the year window, in
/// year → month → day → dataset order.
///
/// The window is assumed validated (`start_year <= end_year`); an inverted
/// window yields nothing.
pub fn enumerate_tasks<'a>(
    start_year: u16,
    end_year: u16,
    datasets: &'a [String],
) -> impl Iterator<Item = ListingTask> + 'a {
    (start_year..=end_year).flat_map(move |year| {
        (1u8..=12).flat_map(move |month| {
            (1u8..=31).flat_map(move |day| {
                datasets.iter().map(move |dataset| ListingTask {
                    dataset: dataset.clone(),
                    year,
                    month,
                    day,
                })
            })
        })
    })
}

/// Number of tasks [`enumerate_tasks`] will yield for the given window.
#[must_use]
pub fn task_count(start_year: u16, end_year: u16, dataset_count: usize) -> usize {
    if start_year > end_year {
        return 0;
    }
    usize::from(end_year - start_year + 1) * 12 * 31 * dataset_count
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn datasets(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| (*n).to_string()).collect()
    }

    #[test]
    fn test_enumerate_cardinality_single_year_single_dataset() {
        let datasets = datasets(&["tranco"]);
        let tasks: Vec<_> = enumerate_tasks(2020, 2020, &datasets).collect();
        assert_eq!(tasks.len(), 12 * 31);
        assert_eq!(tasks.len(), task_count(2020, 2020, 1));
    }

    #[test]
    fn test_enumerate_cardinality_full_product() {
        let datasets = datasets(&["alexa", "radar", "tranco", "umbrella"]);
        let count = enumerate_tasks(2016, 2018, &datasets).count();
        assert_eq!(count, 3 * 12 * 31 * 4);
        assert_eq!(count, task_count(2016, 2018, 4));
    }

    #[test]
    fn test_enumerate_includes_calendar_invalid_dates() {
        let datasets = datasets(&["tranco"]);
        let feb_31 = enumerate_tasks(2021, 2021, &datasets)
            .find(|t| t.month == 2 && t.day == 31);
        assert!(feb_31.is_some(), "day 31 of February must be enumerated");
    }

    #[test]
    fn test_enumerate_order_is_year_month_day_dataset() {
        let datasets = datasets(&["alexa", "tranco"]);
        let tasks: Vec<_> = enumerate_tasks(2020, 2021, &datasets).collect();

        assert_eq!(
            tasks.first().unwrap(),
            &ListingTask {
                dataset: "alexa".to_string(),
                year: 2020,
                month: 1,
                day: 1,
            }
        );
        assert_eq!(
            tasks.get(1).unwrap(),
            &ListingTask {
                dataset: "tranco".to_string(),
                year: 2020,
                month: 1,
                day: 1,
            }
        );
        assert_eq!(
            tasks.last().unwrap(),
            &ListingTask {
                dataset: "tranco".to_string(),
                year: 2021,
                month: 12,
                day: 31,
            }
        );
    }

    #[test]
    fn test_listing_url_zero_pads_month_and_day() {
        let task = ListingTask {
            dataset: "tranco".to_string(),
            year: 2020,
            month: 6,
            day: 5,
        };
        assert_eq!(
            task.listing_url("https://openintel.nl/download/forward-dns/basis=toplist"),
            "https://openintel.nl/download/forward-dns/basis=toplist/source=tranco/year=2020/month=06/day=05/"
        );
    }

    #[test]
    fn test_listing_url_tolerates_trailing_slash_in_base() {
        let task = ListingTask {
            dataset: "radar".to_string(),
            year: 2023,
            month: 11,
            day: 30,
        };
        assert_eq!(
            task.listing_url("http://127.0.0.1:9000/"),
            "http://127.0.0.1:9000/source=radar/year=2023/month=11/day=30/"
        );
    }

    #[test]
    fn test_task_count_inverted_window_is_zero() {
        assert_eq!(task_count(2022, 2020, 4), 0);
    }
}
