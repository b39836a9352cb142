pub mod icons;
pub mod output;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{header, human_bytes, info, section, state, success, warn};
pub use table::{TableBuilder, stats_table};
pub use theme::{Theme, theme};
