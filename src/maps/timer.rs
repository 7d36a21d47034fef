use futures::future::{FutureExt, LocalBoxFuture};
use gloo_timers::future::TimeoutFuture;

use super::traits::Timer;

/// Timer del navegador (setTimeout vía gloo-timers)
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooTimer;

impl Timer for GlooTimer {
    fn sleep(&self, millis: u32) -> LocalBoxFuture<'static, ()> {
        if millis == 0 {
            return futures::future::ready(()).boxed_local();
        }
        TimeoutFuture::new(millis).boxed_local()
    }
}
