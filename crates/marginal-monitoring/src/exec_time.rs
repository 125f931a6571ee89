//! Per-round execution-time columns and their tabular report.
//!
//! Timing columns compose by wrapping: a source that owns extra work
//! prepends its own columns ahead of the base source's, outermost
//! first. The report holds one row per round under a fixed header and
//! rejects rows whose arity drifts.

use serde::{Deserialize, Serialize};

use marginal_core::errors::AggregationError;
use marginal_core::models::{PlotSeries, RoundRecord};

/// A provider of named timing columns for one round.
///
/// `header()`, `row()`, and `display()` must agree on column count and
/// order across calls for a given configuration.
pub trait TimingSource {
    /// Ordered column names.
    fn header(&self) -> Vec<String>;
    /// Ordered values for one recorded round.
    fn row(&self, record: &RoundRecord) -> Vec<f64>;
    /// One empty named series per column, for plotting.
    fn display(&self) -> Vec<PlotSeries>;
}

/// Base columns: the time spent scanning and deciding.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SamplingTimings;

impl TimingSource for SamplingTimings {
    fn header(&self) -> Vec<String> {
        vec!["sampling".to_string()]
    }

    fn row(&self, record: &RoundRecord) -> Vec<f64> {
        vec![record.sampling_time_secs]
    }

    fn display(&self) -> Vec<PlotSeries> {
        vec![PlotSeries::new("Sampling")]
    }
}

/// Model-fit column prepended by strategies that retrain a binary
/// model each round.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct FitTimings;

impl TimingSource for FitTimings {
    fn header(&self) -> Vec<String> {
        vec!["binary_model".to_string()]
    }

    fn row(&self, record: &RoundRecord) -> Vec<f64> {
        vec![record.fit_time_secs]
    }

    fn display(&self) -> Vec<PlotSeries> {
        vec![PlotSeries::new("Binary model")]
    }
}

/// Composition of two timing sources: `outer`'s columns come first.
#[derive(Debug, Clone, Copy, Default)]
pub struct Prepended<O, B> {
    outer: O,
    base: B,
}

impl<O: TimingSource, B: TimingSource> Prepended<O, B> {
    pub fn new(outer: O, base: B) -> Self {
        Self { outer, base }
    }
}

impl<O: TimingSource, B: TimingSource> TimingSource for Prepended<O, B> {
    fn header(&self) -> Vec<String> {
        let mut columns = self.outer.header();
        columns.extend(self.base.header());
        columns
    }

    fn row(&self, record: &RoundRecord) -> Vec<f64> {
        let mut values = self.outer.row(record);
        values.extend(self.base.row(record));
        values
    }

    fn display(&self) -> Vec<PlotSeries> {
        let mut series = self.outer.display();
        series.extend(self.base.display());
        series
    }
}

/// Tabular collection of timing rows, one per recorded round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecTimeReport {
    header: Vec<String>,
    titles: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl ExecTimeReport {
    /// Fix the header (and display titles) from a timing source.
    ///
    /// A source whose `display()` series do not line up one-to-one
    /// with its `header()` columns is rejected here, before any row
    /// is collected.
    pub fn new(source: &dyn TimingSource) -> Result<Self, AggregationError> {
        let header = source.header();
        let titles: Vec<String> = source.display().into_iter().map(|s| s.title).collect();
        if titles.len() != header.len() {
            return Err(AggregationError::TitleArityMismatch {
                columns: header.len(),
                titles: titles.len(),
            });
        }
        Ok(Self {
            header,
            titles,
            rows: Vec::new(),
        })
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Append one round's timing row.
    pub fn add_round(
        &mut self,
        source: &dyn TimingSource,
        record: &RoundRecord,
    ) -> Result<(), AggregationError> {
        let row = source.row(record);
        if row.len() != self.header.len() {
            return Err(AggregationError::RowArityMismatch {
                expected: self.header.len(),
                actual: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// One named series per column, values in round order.
    pub fn display(&self) -> Vec<PlotSeries> {
        self.titles
            .iter()
            .enumerate()
            .map(|(col, title)| {
                PlotSeries::with_values(
                    title.clone(),
                    self.rows.iter().map(|row| row[col]).collect(),
                )
            })
            .collect()
    }
}
