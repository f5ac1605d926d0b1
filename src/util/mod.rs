//! Small filesystem helpers shared by the exporters.

pub mod fs;
