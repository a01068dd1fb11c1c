//! User-visible reporting.
//!
//! Orchestration code never talks to a dialog toolkit directly; it goes
//! through the `Notifier` capability so the presentation (native dialogs,
//! plain logging in tests) can be swapped without touching control flow.

use crate::APP_NAME;

/// Reporting capability handed to the update and session logic.
pub trait Notifier: Send + Sync {
    /// Reports an unrecoverable error and terminates the launcher with
    /// exit code 1.
    fn fatal(&self, message: &str) -> !;

    /// Reports a non-fatal notice. May block the calling thread (the
    /// background update thread calls this), never the session.
    fn info(&self, message: &str);

    /// Reports ongoing work during the blocking bootstrap download.
    fn progress(&self, message: &str);
}

/// Production notifier: native message dialogs plus tracing output.
pub struct DialogNotifier;

impl Notifier for DialogNotifier {
    fn fatal(&self, message: &str) -> ! {
        tracing::error!("{}", message);
        rfd::MessageDialog::new()
            .set_title(&format!("{} Launcher", APP_NAME))
            .set_description(message)
            .set_level(rfd::MessageLevel::Error)
            .set_buttons(rfd::MessageButtons::Ok)
            .show();
        std::process::exit(1);
    }

    fn info(&self, message: &str) {
        tracing::info!("{}", message);
        rfd::MessageDialog::new()
            .set_title(&format!("{} Launcher", APP_NAME))
            .set_description(message)
            .set_level(rfd::MessageLevel::Info)
            .set_buttons(rfd::MessageButtons::Ok)
            .show();
    }

    fn progress(&self, message: &str) {
        // No non-blocking progress window in rfd; the log is the
        // progress surface during bootstrap.
        tracing::info!("{}", message);
    }
}

#[cfg(test)]
pub mod test_support {
    use super::Notifier;
    use std::sync::Mutex;

    /// Records notices instead of showing dialogs; `fatal` panics so a
    /// test that unexpectedly hits it fails loudly.
    #[derive(Default)]
    pub struct RecordingNotifier {
        pub notices: Mutex<Vec<String>>,
    }

    impl Notifier for RecordingNotifier {
        fn fatal(&self, message: &str) -> ! {
            panic!("fatal: {message}");
        }

        fn info(&self, message: &str) {
            self.notices.lock().unwrap().push(message.to_string());
        }

        fn progress(&self, message: &str) {
            self.notices.lock().unwrap().push(message.to_string());
        }
    }
}
