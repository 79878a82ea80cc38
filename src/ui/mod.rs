pub mod dashboard;
pub mod icons;
pub mod progress;

pub use dashboard::{DashboardUI, Tab};
pub use progress::ScanProgress;
