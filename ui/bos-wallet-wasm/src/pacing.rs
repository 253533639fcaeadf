use async_trait::async_trait;
use bos_view::Pacer;
use gloo_timers::future::TimeoutFuture;
use std::time::Duration;

/// Browser timer backed [`Pacer`].
#[derive(Debug, Default, Clone, Copy)]
pub struct TimerPacer;

#[async_trait(?Send)]
impl Pacer for TimerPacer {
    async fn pause(&self, duration: Duration) {
        let millis = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
        TimeoutFuture::new(millis).await;
    }
}
