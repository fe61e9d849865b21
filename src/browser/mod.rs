pub mod chromium;
pub mod driver;
pub mod session;

pub use chromium::ChromiumPage;
pub use driver::{PageDriver, Selector};
pub use session::BrowserSession;
