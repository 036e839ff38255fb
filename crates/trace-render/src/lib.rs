//! trace-render
//!
//! PNG + SVG renditions of templates and captured strokes, data-URL
//! encoding for submission, and markdown assessment reports.

pub mod data_url;
pub mod error;
pub mod raster;
pub mod report;
pub mod svg;
