pub mod aggregate;
pub mod error;
pub mod hourly_table;
pub mod metrics;
pub mod samples;
