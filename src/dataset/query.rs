//! Read-only queries over a [`Table`].

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use super::record::Record;
use super::table::Table;
use super::value::Total;

/// Number of districts returned by [`Table::top_districts`].
pub const TOP_DISTRICTS_LIMIT: usize = 5;

/// Crime total for one district.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistrictTotal {
    pub district: String,
    pub total_crimes: Total,
}

/// Dataset-wide summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total_crimes: i64,
    pub available_years: Vec<i64>,
    pub districts_covered: usize,
}

/// Distinct values clients can filter by.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Filters {
    pub districts: Vec<String>,
    pub years: Vec<i64>,
}

impl Table {
    /// Records whose district matches `district` ignoring case.
    pub fn by_district(&self, district: &str) -> Vec<&Record> {
        let wanted = district.to_lowercase();
        self.records()
            .iter()
            .filter(|r| r.district().is_some_and(|d| d.to_lowercase() == wanted))
            .collect()
    }

    pub fn by_year(&self, year: i64) -> Vec<&Record> {
        self.records()
            .iter()
            .filter(|r| r.year() == Some(year))
            .collect()
    }

    /// Districts with the most crimes, optionally within one year.
    ///
    /// Returns `None` when no record falls within the filter. Districts are
    /// grouped in order of first appearance and the descending sort is
    /// stable, so equal totals keep that order.
    pub fn top_districts(&self, year: Option<i64>, limit: usize) -> Option<Vec<DistrictTotal>> {
        let mut rows = self
            .records()
            .iter()
            .filter(|r| year.is_none() || r.year() == year)
            .peekable();
        rows.peek()?;

        let mut order: Vec<DistrictTotal> = Vec::new();
        let mut slots: HashMap<String, usize> = HashMap::new();
        for record in rows {
            let Some(district) = record.district() else {
                continue;
            };
            let slot = match slots.get(&*district).copied() {
                Some(i) => i,
                None => {
                    slots.insert(district.to_string(), order.len());
                    order.push(DistrictTotal {
                        district: district.into_owned(),
                        total_crimes: Total::default(),
                    });
                    order.len() - 1
                }
            };
            if let Some(value) = record.total_crimes() {
                let entry = &mut order[slot];
                entry.total_crimes = entry.total_crimes.add(value);
            }
        }

        order.sort_by(|a, b| b.total_crimes.as_f64().total_cmp(&a.total_crimes.as_f64()));
        order.truncate(limit);
        Some(order)
    }

    /// Summary over the whole table. An empty table yields zeros.
    pub fn summary(&self) -> Summary {
        let total = self
            .records()
            .iter()
            .filter_map(Record::total_crimes)
            .fold(Total::default(), Total::add);

        Summary {
            total_crimes: total.truncate(),
            available_years: self.distinct_years(),
            districts_covered: self.distinct_districts().len(),
        }
    }

    pub fn filters(&self) -> Filters {
        Filters {
            districts: self.distinct_districts(),
            years: self.distinct_years(),
        }
    }

    fn distinct_districts(&self) -> Vec<String> {
        self.records()
            .iter()
            .filter_map(|r| r.district().map(|d| d.into_owned()))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    fn distinct_years(&self) -> Vec<i64> {
        self.records()
            .iter()
            .filter_map(Record::year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
