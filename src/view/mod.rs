//! Derived, presentation-side views over the board: filtering, table sorting,
//! team colours and the monthly resource chart.

pub mod filter;
pub mod load;
pub mod palette;
pub mod table;

pub use filter::{FilterOptions, ProjectFilter};
pub use load::{default_load_year, monthly_load, MonthLoad};
pub use palette::{TeamPalette, TEAM_COLORS};
pub use table::{sort_projects, SortConfig, SortDirection, SortKey};
