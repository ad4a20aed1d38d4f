//! Upcoming-period reminder.
//!
//! Fires one notification on the day that falls `lead_days` before the
//! predicted next period. Re-evaluating the same prediction on the same day
//! does not fire again.

use chrono::{Datelike, Days, NaiveDate};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use crate::ports::{Clock, Notification, Notifier};

pub const REMINDER_TITLE: &str = "Period Reminder";

/// Reminder tunables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderSettings {
    pub enabled: bool,
    pub lead_days: u32,
    pub duration: Duration,
}

impl Default for ReminderSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            lead_days: 3,
            duration: Duration::from_millis(5000),
        }
    }
}

/// Decides when to remind the user about their next period.
pub struct ReminderNotifier {
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    settings: ReminderSettings,
    /// (prediction, day) of the last reminder sent.
    last_sent: Mutex<Option<(NaiveDate, NaiveDate)>>,
}

impl ReminderNotifier {
    pub fn new(notifier: Arc<dyn Notifier>, clock: Arc<dyn Clock>, settings: ReminderSettings) -> Self {
        Self {
            notifier,
            clock,
            settings,
            last_sent: Mutex::new(None),
        }
    }

    /// Checks `prediction` against today and notifies if due.
    ///
    /// Returns true if a notification was sent.
    pub fn evaluate(&self, prediction: Option<NaiveDate>) -> bool {
        if !self.settings.enabled {
            return false;
        }
        let Some(next_period) = prediction else {
            return false;
        };
        let Some(remind_on) =
            next_period.checked_sub_days(Days::new(u64::from(self.settings.lead_days)))
        else {
            return false;
        };

        let today = self.clock.today();
        if today != remind_on {
            return false;
        }

        {
            let mut last_sent = self.last_sent.lock().unwrap_or_else(PoisonError::into_inner);
            if *last_sent == Some((next_period, today)) {
                tracing::debug!(%next_period, "reminder already sent today");
                return false;
            }
            *last_sent = Some((next_period, today));
        }

        tracing::info!(%next_period, "sending period reminder");
        self.notifier.notify(Notification::new(
            REMINDER_TITLE,
            reminder_message(next_period, self.settings.lead_days),
            self.settings.duration,
        ));
        true
    }
}

/// e.g. "Your next period is expected to start in 3 days, on January 29th."
pub fn reminder_message(next_period: NaiveDate, lead_days: u32) -> String {
    let unit = if lead_days == 1 { "day" } else { "days" };
    format!(
        "Your next period is expected to start in {} {}, on {}.",
        lead_days,
        unit,
        month_and_ordinal_day(next_period)
    )
}

fn month_and_ordinal_day(date: NaiveDate) -> String {
    let day = date.day();
    let suffix = match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{} {}{}", date.format("%B"), day, suffix)
}
