//! The reminder notification and the channel it is posted on

use std::fmt;

/// Title shown on every reminder
pub const REMINDER_TITLE: &str = "Напоминание";

/// Freedesktop icon name used for every reminder
pub const REMINDER_ICON: &str = "dialog-information";

/// Channel all reminders are posted on
pub const REMINDER_CHANNEL_ID: &str = "reminder_channel";

/// Human-readable channel name
pub const REMINDER_CHANNEL_NAME: &str = "Reminder Notifications";

/// Every reminder reuses this identifier, so a newer one replaces an older
/// one still on display instead of stacking.
pub const REMINDER_NOTIFICATION_ID: NotificationId = NotificationId(1);

/// Logical notification identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(pub u32);

impl NotificationId {
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Notification priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Priority {
    Low,
    #[default]
    Default,
    High,
}

impl Priority {
    const fn rank(&self) -> u8 {
        match self {
            Self::Low => 0,
            Self::Default => 1,
            Self::High => 2,
        }
    }
}

/// Channel importance level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Importance {
    Low,
    #[default]
    Default,
    High,
}

impl Importance {
    const fn rank(&self) -> u8 {
        match self {
            Self::Low => 0,
            Self::Default => 1,
            Self::High => 2,
        }
    }
}

/// Urgency sent to desktop notification servers.
///
/// There is no `critical` level here: critical notifications never expire
/// and ignore do-not-disturb.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    Low,
    Normal,
}

impl Urgency {
    /// Level name understood by `notify-send`
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Normal => "normal",
        }
    }
}

/// A notification category the platform must know about before posting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationChannel {
    pub id: String,
    pub name: String,
    pub importance: Importance,
}

impl NotificationChannel {
    /// The single channel reminders use
    pub fn reminders() -> Self {
        Self {
            id: REMINDER_CHANNEL_ID.to_string(),
            name: REMINDER_CHANNEL_NAME.to_string(),
            importance: Importance::High,
        }
    }
}

/// A fully built reminder, ready to hand to the notification service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderNotification {
    pub channel_id: String,
    pub title: String,
    pub body: String,
    pub icon: String,
    pub priority: Priority,
}

impl ReminderNotification {
    /// Build a reminder carrying `message` verbatim as its body
    pub fn new(message: &str) -> Self {
        Self {
            channel_id: REMINDER_CHANNEL_ID.to_string(),
            title: REMINDER_TITLE.to_string(),
            body: message.to_string(),
            icon: REMINDER_ICON.to_string(),
            priority: Priority::High,
        }
    }

    /// Urgency when posted on `channel`; the channel's importance caps the
    /// notification's own priority
    pub fn urgency_on(&self, channel: &NotificationChannel) -> Urgency {
        match self.priority.rank().min(channel.importance.rank()) {
            0 => Urgency::Low,
            _ => Urgency::Normal,
        }
    }
}
