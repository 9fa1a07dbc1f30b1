//! Read-only exploratory analysis over a loaded [`Dataset`](crate::dataset::Dataset).
//!
//! Each sub-view (overview, city-wise, correlation, distributions/scatter) is a pure function of
//! the table and never depends on another sub-view's output.

pub mod correlation;
pub mod distribution;
pub mod grouping;
mod stats;
pub mod summary;
pub mod trend;

pub use correlation::{CorrelationMatrix, correlation_matrix};
pub use distribution::{BoxSummary, Distribution, Histogram, distributions};
pub use grouping::{CityBreakdown, GroupCount, GroupMeans, city_breakdown};
pub use summary::{ColumnProfile, ColumnSummary, Overview, Preview, overview};
pub use trend::{ScatterGroup, ScatterPlot, TrendLine, fit_ols, scatter_plots};
