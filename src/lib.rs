//! Mela – an apple-quality dataset dashboard.
//!
//! Three stages: load a CSV/XLSX export, explore the cleaned table with
//! frequency, distribution, and correlation charts, and classify every row
//! with the bundled models.

pub mod app;
pub mod color;
pub mod data;
pub mod infer;
pub mod model;
pub mod state;
pub mod stats;
pub mod ui;
