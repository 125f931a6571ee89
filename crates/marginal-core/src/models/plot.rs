use serde::{Deserialize, Serialize};

/// A named series of values ready for plotting. Rendering is the
/// export collaborator's concern; the core only names and orders the
/// points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotSeries {
    /// Human-readable series title (e.g. "Binary model").
    pub title: String,
    /// One value per recorded round, in round order.
    pub values: Vec<f64>,
}

impl PlotSeries {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            values: Vec::new(),
        }
    }

    pub fn with_values(title: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            title: title.into(),
            values,
        }
    }
}
