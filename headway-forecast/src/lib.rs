//! Forecast demand access for the Headway dispatch engine.
//!
//! A [`ForecastTable`] holds passenger counts per stop, sampled on a
//! (possibly gappy) 10-minute cadence. [`DemandAccessor`] turns a scoped stop
//! sequence, a reference clock and a delay into a [`DemandSummary`]: how many
//! passengers a vehicle would meet and how long the busiest stop waits.
//! Samples already recorded in a stop's visit history are never counted
//! twice.

#![forbid(unsafe_code)]

mod accessor;
mod bucket;
mod cache;
mod load;
mod table;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use crate::accessor::{DemandAccessor, DemandSummary};
pub use crate::bucket::{SAMPLE_CADENCE, ceil_to_bucket, floor_to_bucket};
pub use crate::cache::{DemandCache, DemandKey};
pub use crate::load::{
    COLUMN_PASSENGERS, COLUMN_STOP_ID, COLUMN_TIMESPAN, ForecastLoadError, read_forecast,
};
pub use crate::table::{DemandSample, ForecastTable};
