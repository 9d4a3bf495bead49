//! Full-dataset fetch with completeness check.

use std::fmt;

use super::PageSource;
use super::SearchQuery;
use super::pages::SearchPages;
use crate::error::Error;
use crate::model::Record;

/// Counts describing how a full fetch ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchReport {
    /// Total reported by the server on the first page.
    pub total: u64,
    /// Number of records accumulated.
    pub collected: usize,
    /// `total` minus every item received. Negative if the server overshot.
    pub remaining: i64,
    /// Last page number requested.
    pub last_page: u32,
}

impl FetchReport {
    /// Returns `true` if nothing is outstanding and the counts agree.
    pub fn is_consistent(&self) -> bool {
        self.remaining == 0 && self.collected as u64 == self.total
    }
}

impl fmt::Display for FetchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total reported:    {}", self.total)?;
        writeln!(f, "Records collected: {}", self.collected)?;
        writeln!(f, "Outstanding:       {}", self.remaining)?;
        write!(f, "Last page:         {}", self.last_page)
    }
}

/// Result of [`fetch_all`].
///
/// Both variants carry the records in server page order. An incomplete fetch
/// is not an error: the records are still usable, the report says what went
/// wrong.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// Every record the server promised was collected.
    Complete {
        records: Vec<Record>,
        report: FetchReport,
    },
    /// The collected count disagrees with the server-reported total.
    Incomplete {
        records: Vec<Record>,
        report: FetchReport,
    },
}

impl FetchOutcome {
    /// Returns `true` for [`FetchOutcome::Complete`].
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete { .. })
    }

    pub fn report(&self) -> &FetchReport {
        match self {
            Self::Complete { report, .. } | Self::Incomplete { report, .. } => report,
        }
    }

    pub fn records(&self) -> &[Record] {
        match self {
            Self::Complete { records, .. } | Self::Incomplete { records, .. } => records,
        }
    }

    pub fn into_records(self) -> Vec<Record> {
        self.into_parts().0
    }

    /// Splits the outcome into its records and report.
    pub fn into_parts(self) -> (Vec<Record>, FetchReport) {
        match self {
            Self::Complete { records, report } | Self::Incomplete { records, report } => {
                (records, report)
            }
        }
    }
}

/// Fetches every page of `query` from `source`.
///
/// Page 1 supplies the total. Further pages are requested one at a time while
/// records are still outstanding. The loop also stops on an empty page, since
/// the server has nothing more to give; that case ends up
/// [`FetchOutcome::Incomplete`].
///
/// # Errors
///
/// Any page failure is returned as-is. Needing a page beyond `max_pages`
/// (clamped to at least 1) returns [`Error::PageLimitExceeded`].
pub async fn fetch_all<S>(source: &S, query: &SearchQuery, max_pages: u32) -> Result<FetchOutcome, Error>
where
    S: PageSource + ?Sized,
{
    let max_pages = max_pages.max(1);
    let mut pages = SearchPages::new(source, query, max_pages);

    let Some(first) = pages.next().await else {
        return Err(Error::PageLimitExceeded {
            max_pages,
            total: 0,
            collected: 0,
            remaining: 0,
        });
    };
    let first = first?;

    let total = first.total();
    let mut records = first.into_items();
    let mut remaining = i64::try_from(total).unwrap_or(i64::MAX) - records.len() as i64;

    while remaining > 0 {
        let page = match pages.next().await {
            Some(page) => page?,
            None => {
                return Err(Error::PageLimitExceeded {
                    max_pages,
                    total,
                    collected: records.len(),
                    remaining,
                });
            }
        };

        if page.is_empty() {
            log::warn!(
                "Page {} came back empty with {} records outstanding",
                pages.last_page(),
                remaining
            );
            break;
        }

        remaining -= page.len() as i64;
        records.extend(page.into_items());
    }

    let report = FetchReport {
        total,
        collected: records.len(),
        remaining,
        last_page: pages.last_page(),
    };

    if report.is_consistent() {
        log::info!(
            "Fetched all {} records in {} pages",
            report.total,
            report.last_page
        );
        Ok(FetchOutcome::Complete { records, report })
    } else {
        log::warn!(
            "Incomplete fetch: total {}, collected {}, missing {}, last page {}",
            report.total,
            report.collected,
            report.remaining,
            report.last_page
        );
        Ok(FetchOutcome::Incomplete { records, report })
    }
}
