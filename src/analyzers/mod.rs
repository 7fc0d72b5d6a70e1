//! Grouped aggregation of load-event records.
//!
//! [`aggregate::group_mean`] groups records by a key tuple and averages the
//! requested columns, skipping missing values. [`summaries::Summaries`]
//! runs it for the seven report views listed in [`summaries::DEFINITIONS`].

pub mod aggregate;
pub mod summaries;
pub mod types;
pub mod utility;
