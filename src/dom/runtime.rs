//! Browser task spawning and timers

use std::time::Duration;

use futures::future::{FutureExt, LocalBoxFuture};
use futures::task::{LocalFutureObj, LocalSpawn, SpawnError};
use js_sys::Promise;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::Window;

use crate::error::describe_js;
use crate::viewer::Sleeper;

/// Runs local futures on the browser microtask queue
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserSpawner;

impl LocalSpawn for BrowserSpawner {
    fn spawn_local_obj(&self, future: LocalFutureObj<'static, ()>) -> Result<(), SpawnError> {
        wasm_bindgen_futures::spawn_local(future);
        Ok(())
    }
}

/// `setTimeout`-based sleep
pub struct TimeoutSleeper {
    window: Window,
}

impl TimeoutSleeper {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl Sleeper for TimeoutSleeper {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        let millis = i32::try_from(duration.as_millis()).unwrap_or(i32::MAX);
        let window = &self.window;

        let promise = Promise::new(&mut |resolve, _reject| {
            if let Err(e) =
                window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, millis)
            {
                tracing::warn!("setTimeout failed, firing immediately: {}", describe_js(&e));
                let _ = resolve.call0(&JsValue::NULL);
            }
        });

        async move {
            let _ = JsFuture::from(promise).await;
        }
        .boxed_local()
    }
}
