pub mod disclosure;
pub mod lifecycle;

pub use disclosure::DisclosureSet;
pub use lifecycle::{LifecycleState, ReportSession, Submission};
