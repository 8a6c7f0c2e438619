//! Terminal presentation for the CLI

pub mod icons;
pub mod output;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{header, human_bytes, muted, section, status, success, summary_row, warn};
pub use table::SectionTable;
pub use theme::{theme, Theme};
