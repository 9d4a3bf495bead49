//! Headline metrics and grouped totals.

use std::collections::BTreeMap;
use std::collections::HashSet;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use super::Dataset;
use crate::model::Contract;

const MILLION: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Headline numbers for a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overview {
    /// Number of contracts.
    pub records: usize,
    /// Sum of global values.
    pub total_value: Decimal,
    /// Distinct non-null issuing bodies.
    pub distinct_bodies: usize,
    /// Distinct non-null municipalities.
    pub distinct_municipalities: usize,
}

impl Overview {
    /// Sum of global values, in millions.
    pub fn total_value_millions(&self) -> Decimal {
        self.total_value / MILLION
    }
}

/// Summed value of one issuing body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyTotal {
    pub body: String,
    pub value_millions: Decimal,
}

/// A municipality's part of the dataset's total value.
#[derive(Debug, Clone, PartialEq)]
pub struct MunicipalityShare {
    pub municipality: String,
    pub value: Decimal,
    /// Fraction of the total, between 0 and 1. Zero when the total is zero.
    pub share: f64,
}

impl Dataset {
    /// Computes the headline metrics.
    pub fn overview(&self) -> Overview {
        let bodies: HashSet<_> = self.iter().filter_map(Contract::body_name).collect();
        let municipalities: HashSet<_> = self
            .iter()
            .filter_map(Contract::municipality_name)
            .collect();

        Overview {
            records: self.len(),
            total_value: total_value(self),
            distinct_bodies: bodies.len(),
            distinct_municipalities: municipalities.len(),
        }
    }

    /// Returns the `n` bodies with the largest summed value, largest first.
    ///
    /// Ties are broken by name. Contracts without a body are left out.
    pub fn top_bodies(&self, n: usize) -> Vec<BodyTotal> {
        let mut totals: Vec<_> = group_values(self, Contract::body_name)
            .into_iter()
            .map(|(body, value)| BodyTotal {
                body: body.to_string(),
                value_millions: value / MILLION,
            })
            .collect();

        totals.sort_by(|a, b| {
            b.value_millions
                .cmp(&a.value_millions)
                .then_with(|| a.body.cmp(&b.body))
        });
        totals.truncate(n);
        totals
    }

    /// Returns every municipality's summed value and share, largest first.
    ///
    /// Contracts without a municipality are left out of the groups but still
    /// count toward the total the shares are relative to.
    pub fn municipality_shares(&self) -> Vec<MunicipalityShare> {
        let total = total_value(self);

        let mut shares: Vec<_> = group_values(self, Contract::municipality_name)
            .into_iter()
            .map(|(municipality, value)| MunicipalityShare {
                municipality: municipality.to_string(),
                value,
                share: fraction(value, total),
            })
            .collect();

        shares.sort_by(|a, b| {
            b.value
                .cmp(&a.value)
                .then_with(|| a.municipality.cmp(&b.municipality))
        });
        shares
    }
}

/// Sums every global value, saturating at the `Decimal` bounds.
fn total_value(dataset: &Dataset) -> Decimal {
    dataset
        .iter()
        .map(Contract::global_value)
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

fn group_values<'a>(
    dataset: &'a Dataset,
    key: impl Fn(&'a Contract) -> Option<&'a str>,
) -> BTreeMap<&'a str, Decimal> {
    let mut groups: BTreeMap<&str, Decimal> = BTreeMap::new();
    for contract in dataset {
        if let Some(name) = key(contract) {
            let sum = groups.entry(name).or_default();
            *sum = sum.saturating_add(contract.global_value());
        }
    }
    groups
}

fn fraction(part: Decimal, total: Decimal) -> f64 {
    if total.is_zero() {
        return 0.0;
    }
    (part / total).to_f64().unwrap_or(0.0)
}
