/// Data layer: core table types, loading, cleaning, and export.
///
/// Architecture:
/// ```text
///  .csv / .xlsx
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → DataTable (raw)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  clean    │  drop fixed columns, drop rows with nulls
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  export   │  DataTable → CSV bytes for download
///   └──────────┘
/// ```

pub mod clean;
pub mod export;
pub mod loader;
pub mod model;
