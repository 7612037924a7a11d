pub mod interval;
pub mod packing;
pub mod reschedule;
pub mod viewport;

pub use interval::{days_in_year, visible_span, DaySpan};
pub use packing::{pack_rows, RowLayout};
pub use reschedule::{reschedule, DragGesture};
pub use viewport::{BarGeometry, YearViewport};
