//! Post-COVID assessment support for Kent & Medway clinicians.
//!
//! Clinicians select symptoms and a postcode; the crate validates the location,
//! selects static recommendations, and picks local services from a fixed catalog.

pub mod assessment;
pub mod config;
pub mod error;
pub mod session;
pub mod telemetry;
