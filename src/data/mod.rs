/// Data layer: core types and file ingestion.
///
/// Architecture:
/// ```text
///  .csv / .txt (any layout, any encoding)
///        │
///        ▼
///   ┌──────────┐
///   │ encoding  │  BOM / statistical guess → decoded text
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  try candidate layouts → Series
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ Series + name │  keyed by the dataset name of the path
///   └──────────────┘
/// ```

pub mod encoding;
pub mod loader;
pub mod model;
pub mod name;
