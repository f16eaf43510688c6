//! Raw catalog readers: tabular CSV inputs and the Hipparcos I/311 file.
pub mod csv;
pub mod hipparcos;
