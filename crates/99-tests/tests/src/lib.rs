//! Cross-crate test suite for the view reducers.
//!
//! Every scenario here runs against both engines through the shared
//! `ViewEngine` seam.

#[cfg(test)]
mod conformance;

#[cfg(test)]
mod equivalence;

#[cfg(test)]
mod fixtures;

#[cfg(test)]
mod properties;
