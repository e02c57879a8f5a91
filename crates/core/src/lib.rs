//! Domain values and the code-similarity engine used by LogiCode's
//! academic-integrity reports.

pub mod domain;
pub mod similarity;
