use notify_rust::{Notification, Timeout};

use super::{ChannelError, Notice, NotifyChannel};

/// Desktop notification channel.
///
/// Delivers through the platform notification service (libnotify on Linux,
/// Notification Center on macOS, toasts on Windows). Absence of a running
/// notification daemon shows up as a send error, which the dispatcher drops.
#[derive(Debug, Default)]
pub struct DesktopChannel;

impl DesktopChannel {
    pub fn new() -> Self {
        DesktopChannel
    }
}

impl NotifyChannel for DesktopChannel {
    fn enabled(&self) -> bool {
        true
    }

    fn send(&self, notice: &Notice) -> Result<(), ChannelError> {
        Notification::new()
            .summary(&notice.title)
            .body(&notice.message)
            .timeout(Timeout::Milliseconds(notice.timeout.as_millis() as u32))
            .show()
            .map(|_| ())
            .map_err(|e| ChannelError::Desktop(e.to_string()))
    }
}
