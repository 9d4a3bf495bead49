//! Normalized contract table and the views built on it.
//!
//! A [`Dataset`] is the fetched record sequence with derived columns attached.
//! Filtering, summaries and CSV export all operate on it and never fail on
//! malformed field data.

mod export;
mod filter;
mod summary;

pub use export::*;
pub use filter::*;
pub use summary::*;

use std::cmp::Ordering;

use crate::model::Contract;
use crate::model::Record;

/// An ordered table of contracts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    contracts: Vec<Contract>,
}

impl Dataset {
    /// Builds a dataset from fetched records, keeping their order.
    pub fn from_records(records: impl IntoIterator<Item = Record>) -> Self {
        records.into_iter().map(Contract::from_record).collect()
    }

    /// Returns the contracts in their original order.
    pub fn contracts(&self) -> &[Contract] {
        &self.contracts
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Contract> {
        self.contracts.iter()
    }

    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }

    /// Returns a new dataset holding only the contracts that match `filter`.
    pub fn filter(&self, filter: &ContractFilter) -> Dataset {
        self.contracts
            .iter()
            .filter(|c| filter.matches(c))
            .cloned()
            .collect()
    }

    /// Returns the contracts ordered by signing date, newest first.
    ///
    /// Contracts without a date come last, in their original order.
    pub fn sorted_by_signing_date(&self) -> Vec<&Contract> {
        let mut sorted: Vec<_> = self.contracts.iter().collect();
        sorted.sort_by(|a, b| match (a.signing_date(), b.signing_date()) {
            (Some(a), Some(b)) => b.cmp(&a),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
        sorted
    }
}

impl FromIterator<Contract> for Dataset {
    fn from_iter<I: IntoIterator<Item = Contract>>(iter: I) -> Self {
        Self {
            contracts: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Dataset {
    type Item = Contract;
    type IntoIter = std::vec::IntoIter<Contract>;

    fn into_iter(self) -> Self::IntoIter {
        self.contracts.into_iter()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Contract;
    type IntoIter = std::slice::Iter<'a, Contract>;

    fn into_iter(self) -> Self::IntoIter {
        self.contracts.iter()
    }
}
