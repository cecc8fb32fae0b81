pub mod curve;
pub mod date;
pub mod palette;
pub mod primitives;
pub mod scale;
pub mod stack;
pub mod time_scale;
pub mod types;

pub use curve::{PathSegment, basis_area_path};
pub use date::{DateCell, parse_calendar_date, parse_date_cell};
pub use palette::ColorScheme;
pub use scale::LinearScale;
pub use stack::{StackLayer, StackLayout, StackPoint, StreamOffset, stack_columns};
pub use time_scale::TimeScale;
pub use types::{CanonicalRecord, RawValue, Viewport};
