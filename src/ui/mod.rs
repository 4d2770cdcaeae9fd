pub mod icons;
pub mod output;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{error, heading, info, record_line, success, warn};
pub use table::students_table;
pub use theme::{theme, Theme};
