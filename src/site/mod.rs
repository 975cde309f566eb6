//! Build-page generation: artifact bookkeeping and document rendering
//!
//! The page lists the most recent CI artifacts newest-first, one table row per
//! build and one column per platform. `artifacts` owns filename patterns,
//! retention and aliases; `render` turns rows into the two listing documents.

pub mod artifacts;
pub mod render;
