//! Outer surfaces: CSV input of drafts and report output.

pub mod csv;
