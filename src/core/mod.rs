//! Core presentation logic - framework-agnostic filtering, summaries,
//! display tables and formatting over in-memory records.

/// Display metadata (badges) per enumerated field
pub mod display;
/// Collection filter over query and categorical selectors
pub mod filter;
/// Locale-aware currency, date and relative-time formatting
pub mod format;
/// Permission grouping and role coverage
pub mod permission;
/// Category distribution summaries
pub mod summary;
/// Wall feed ordering
pub mod wall;
