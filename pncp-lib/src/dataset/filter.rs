//! Multi-select and range filters over contracts.

use std::collections::BTreeSet;

use rust_decimal::Decimal;

use super::Dataset;
use crate::model::Contract;

/// Selection over the filterable columns.
///
/// An empty selection places no constraint on its column. A non-empty one
/// only matches contracts whose value is in it, so a contract with the column
/// missing never matches. The value range is inclusive on both ends.
///
/// # Example
///
/// ```
/// use pncp_lib::dataset::ContractFilter;
///
/// let filter = ContractFilter::new()
///     .uf("PE")
///     .uf("PB")
///     .year(2023);
/// assert!(!filter.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContractFilter {
    pub bodies: BTreeSet<String>,
    pub municipalities: BTreeSet<String>,
    pub ufs: BTreeSet<String>,
    pub modalities: BTreeSet<String>,
    pub years: BTreeSet<i32>,
    pub min_value: Option<Decimal>,
    pub max_value: Option<Decimal>,
}

impl ContractFilter {
    /// Creates a filter that matches everything.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.bodies.insert(body.into());
        self
    }

    pub fn municipality(mut self, municipality: impl Into<String>) -> Self {
        self.municipalities.insert(municipality.into());
        self
    }

    pub fn uf(mut self, uf: impl Into<String>) -> Self {
        self.ufs.insert(uf.into());
        self
    }

    pub fn modality(mut self, modality: impl Into<String>) -> Self {
        self.modalities.insert(modality.into());
        self
    }

    pub fn year(mut self, year: i32) -> Self {
        self.years.insert(year);
        self
    }

    /// Sets the inclusive lower bound on the global value.
    pub fn min_value(mut self, value: Decimal) -> Self {
        self.min_value = Some(value);
        self
    }

    /// Sets the inclusive upper bound on the global value.
    pub fn max_value(mut self, value: Decimal) -> Self {
        self.max_value = Some(value);
        self
    }

    /// Returns `true` if the filter places no constraint at all.
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
            && self.municipalities.is_empty()
            && self.ufs.is_empty()
            && self.modalities.is_empty()
            && self.years.is_empty()
            && self.min_value.is_none()
            && self.max_value.is_none()
    }

    /// Returns `true` if the contract passes every constraint.
    pub fn matches(&self, contract: &Contract) -> bool {
        selected(&self.bodies, contract.body_name())
            && selected(&self.municipalities, contract.municipality_name())
            && selected(&self.ufs, contract.uf())
            && selected(&self.modalities, contract.modality_name())
            && (self.years.is_empty()
                || contract.year().is_some_and(|y| self.years.contains(&y)))
            && self.min_value.is_none_or(|min| contract.global_value() >= min)
            && self.max_value.is_none_or(|max| contract.global_value() <= max)
    }
}

fn selected(selection: &BTreeSet<String>, value: Option<&str>) -> bool {
    selection.is_empty() || value.is_some_and(|v| selection.contains(v))
}

/// The values a filter can be built from.
///
/// Text and year lists are distinct, non-null and sorted. The value bounds
/// are `None` only for an empty dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub bodies: Vec<String>,
    pub municipalities: Vec<String>,
    pub ufs: Vec<String>,
    pub modalities: Vec<String>,
    pub years: Vec<i32>,
    pub min_value: Option<Decimal>,
    pub max_value: Option<Decimal>,
}

impl Dataset {
    /// Collects the distinct values of every filterable column.
    pub fn filter_options(&self) -> FilterOptions {
        let mut bodies = BTreeSet::new();
        let mut municipalities = BTreeSet::new();
        let mut ufs = BTreeSet::new();
        let mut modalities = BTreeSet::new();
        let mut years = BTreeSet::new();

        for contract in self {
            bodies.extend(contract.body_name());
            municipalities.extend(contract.municipality_name());
            ufs.extend(contract.uf());
            modalities.extend(contract.modality_name());
            years.extend(contract.year());
        }

        FilterOptions {
            bodies: bodies.into_iter().map(String::from).collect(),
            municipalities: municipalities.into_iter().map(String::from).collect(),
            ufs: ufs.into_iter().map(String::from).collect(),
            modalities: modalities.into_iter().map(String::from).collect(),
            years: years.into_iter().collect(),
            min_value: self.iter().map(Contract::global_value).min(),
            max_value: self.iter().map(Contract::global_value).max(),
        }
    }
}
