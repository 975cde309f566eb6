//! Release-note extraction and artifact versioning
//!
//! `extract` copies the first release section out of the changelog; `rename`
//! stamps the released version into the fresh artifact filenames.

pub mod extract;
pub mod rename;
