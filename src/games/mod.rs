//! Game implementations.

pub mod bertrand;
