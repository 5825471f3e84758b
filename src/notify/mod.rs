//! Fire-and-forget notifications for task list events.
//!
//! Events are dispatched to every enabled channel; delivery is best-effort
//! and channel failures are never surfaced to the user. The TUI shows the
//! same notice transiently in its status row, so the app stays fully usable
//! when notifications are disabled or no channel can deliver.

pub mod desktop;

pub use desktop::DesktopChannel;

use std::time::Duration;

use chrono::NaiveDateTime;

use crate::model::config::NotifyConfig;

/// Channel delivery failure. The dispatcher swallows these.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    #[error("desktop notification failed: {0}")]
    Desktop(String),
}

/// A task list event worth telling the user about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyEvent {
    TaskAdded { name: String },
    TaskDeleted { name: String },
    AllTasksDeleted { count: usize },
    TaskCompleted { name: String },
    TaskDue { name: String, due: NaiveDateTime },
}

impl NotifyEvent {
    pub fn title(&self) -> &'static str {
        match self {
            NotifyEvent::TaskAdded { .. } => "Task Added",
            NotifyEvent::TaskDeleted { .. } => "Task Deleted",
            NotifyEvent::AllTasksDeleted { .. } => "Tasks Deleted",
            NotifyEvent::TaskCompleted { .. } => "Task Completed",
            NotifyEvent::TaskDue { .. } => "Task Due",
        }
    }

    pub fn message(&self) -> String {
        match self {
            NotifyEvent::TaskAdded { name } => format!("\"{}\" has been added.", name),
            NotifyEvent::TaskDeleted { name } => format!("\"{}\" has been deleted.", name),
            NotifyEvent::AllTasksDeleted { count } => {
                format!("All {} tasks have been deleted.", count)
            }
            NotifyEvent::TaskCompleted { name } => {
                format!("\"{}\" has been marked as done.", name)
            }
            NotifyEvent::TaskDue { name, due } => {
                format!("\"{}\" was due at {}.", name, due.format("%Y-%m-%d %H:%M"))
            }
        }
    }

    /// Render this event into a displayable notice
    pub fn notice(&self, timeout: Duration) -> Notice {
        Notice {
            title: self.title().to_string(),
            message: self.message(),
            timeout,
        }
    }
}

/// A rendered notification: title, body, and display duration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
    pub timeout: Duration,
}

/// Trait for notification channels
pub trait NotifyChannel {
    /// Whether this channel can currently deliver
    fn enabled(&self) -> bool;

    /// Deliver a notice
    fn send(&self, notice: &Notice) -> Result<(), ChannelError>;
}

/// Central notification dispatcher.
///
/// Owns the configured channels and fans each event out to all of them.
pub struct Notifier {
    channels: Vec<Box<dyn NotifyChannel>>,
    timeout: Duration,
    disabled: bool,
}

impl Notifier {
    /// Build a notifier from config with the default desktop channel
    pub fn new(config: &NotifyConfig) -> Self {
        Notifier {
            channels: vec![Box::new(DesktopChannel::new())],
            timeout: Duration::from_secs(config.timeout_secs),
            disabled: !config.enabled,
        }
    }

    /// A notifier that renders notices but never delivers them
    pub fn disabled() -> Self {
        Notifier {
            channels: Vec::new(),
            timeout: Duration::from_secs(NotifyConfig::default().timeout_secs),
            disabled: true,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_channels(channels: Vec<Box<dyn NotifyChannel>>, timeout: Duration) -> Self {
        Notifier {
            channels,
            timeout,
            disabled: false,
        }
    }

    /// Dispatch an event to every enabled channel and return the rendered
    /// notice so the caller can display it. Channel errors are dropped.
    pub fn notify(&self, event: &NotifyEvent) -> Notice {
        let notice = event.notice(self.timeout);
        if !self.disabled {
            for channel in &self.channels {
                if channel.enabled() {
                    let _ = channel.send(&notice);
                }
            }
        }
        notice
    }
}
