//! Live monitoring: terminal dashboard and logging setup.

mod dashboard;
mod logging;

pub use dashboard::{Dashboard, DashboardState, KeyAction, Tab};
pub use logging::{setup_logging, LogOptions};
