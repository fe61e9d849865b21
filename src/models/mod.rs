pub mod date_window;
pub mod review;
pub mod source;

pub use date_window::{parse_calendar_date, DateWindow, WindowPosition};
pub use review::{Rating, ReviewRecord};
pub use source::SiteTag;
