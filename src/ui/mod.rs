pub mod icons;
pub mod output;
pub mod progress;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{banner, bar, dim, error, header, info, section, success, summary_row, warn};
pub use progress::Spinner;
pub use table::{metrics_table, projects_table, students_table};
pub use theme::{theme, Theme};
