//! Reminder domain module

mod delay;
mod draft;
mod notification;

pub use delay::{Delay, MAX_DELAY_SECS, MIN_DELAY_SECS};
pub use draft::Draft;
pub use notification::{
    Importance, NotificationChannel, NotificationId, Priority, ReminderNotification,
    REMINDER_CHANNEL_ID, REMINDER_CHANNEL_NAME, REMINDER_ICON, REMINDER_NOTIFICATION_ID,
    REMINDER_TITLE, Urgency,
};
