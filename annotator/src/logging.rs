//! Logger setup for applications embedding the annotator.

use std::sync::atomic::{AtomicBool, Ordering};

static IS_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Installs a logger for the `log` facade.
///
/// On native targets this is `env_logger` with the `info` level unless
/// `RUST_LOG` says otherwise. In the browser messages go to the console and
/// panics are reported there too. Calls after the first one do nothing.
pub fn init_logger() {
    if IS_INITIALIZED.swap(true, Ordering::SeqCst) {
        return;
    }

    cfg_if::cfg_if! {
        if #[cfg(target_arch = "wasm32")] {
            console_error_panic_hook::set_once();
            // Errors only if another logger is already installed.
            let _ = console_log::init_with_level(log::Level::Info);
        } else {
            let env = env_logger::Env::default().default_filter_or("info");
            if let Err(err) = env_logger::Builder::from_env(env).try_init() {
                eprintln!("Logger is already set: {err}");
            }
        }
    }

    log::debug!("Logger initialized");
}
