use async_trait::async_trait;
use std::time::Duration;

/// Delays kept between onboarding steps so screens do not flash past.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewConfig {
    /// Minimum time the "create" screen stays up while the seed is generated.
    pub create_delay: Duration,
    /// Time the "loading" screen stays up before the dashboard appears.
    pub loading_delay: Duration,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            create_delay: Duration::from_millis(1000),
            loading_delay: Duration::from_millis(1000),
        }
    }
}

#[async_trait(?Send)]
pub trait Pacer {
    async fn pause(&self, duration: Duration);
}

/// Resolves immediately.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPause;

#[async_trait(?Send)]
impl Pacer for NoPause {
    async fn pause(&self, _duration: Duration) {}
}
