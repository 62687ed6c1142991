use super::AppFinder;
use crate::models::Application;

/// Stand-in for platforms without a discovery strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedFinder;

impl AppFinder for UnsupportedFinder {
    fn find(&self) -> Vec<Application> {
        tracing::warn!(
            os = std::env::consts::OS,
            "Application discovery is not supported on this platform"
        );
        Vec::new()
    }

    fn name(&self) -> &'static str {
        "unsupported"
    }
}
