//! Session role lookup and the notification feed.

use std::time::{Duration, Instant};

use super::{Dashboard, Loaded};
use crate::models::{Notification, UserType};

impl<'a> Dashboard<'a> {
    /// Role of the connected address; unregistered on failure.
    pub fn resolve_session(&self, address: &str) -> Loaded<UserType> {
        match self.contract.get_user_type(address) {
            Ok(user) => Loaded::ok(user),
            Err(e) => Loaded::fallback(UserType::unregistered(), "Failed to verify account", e),
        }
    }

    /// Notifications for an address, newest first.
    ///
    /// Timestamps are whole seconds, so notifications from the same second
    /// are ordered by reversed arrival.
    pub fn load_notifications(&self, address: &str) -> Loaded<Vec<Notification>> {
        match self.contract.get_notifications(address) {
            Ok(mut notifications) => {
                notifications.reverse();
                notifications.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
                Loaded::ok(notifications)
            }
            Err(e) => Loaded::fallback(Vec::new(), "Failed to load notifications", e),
        }
    }
}

/// Tracks when the notification feed should next poll.
#[derive(Debug, Clone)]
pub struct NotificationFeed {
    interval: Duration,
    last_refresh: Option<Instant>,
    notifications: Vec<Notification>,
}

impl NotificationFeed {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_refresh: None,
            notifications: Vec::new(),
        }
    }

    /// Due on first use, then once per interval.
    pub fn is_due(&self, now: Instant) -> bool {
        match self.last_refresh {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.interval,
        }
    }

    /// Time left until the next poll.
    pub fn next_due_in(&self, now: Instant) -> Duration {
        match self.last_refresh {
            None => Duration::ZERO,
            Some(last) => self
                .interval
                .saturating_sub(now.saturating_duration_since(last)),
        }
    }

    /// Poll if due. A failed poll keeps the previous list.
    /// Returns true if a poll happened.
    pub fn refresh(&mut self, dashboard: &Dashboard<'_>, address: &str, now: Instant) -> bool {
        if !self.is_due(now) {
            return false;
        }
        let loaded = dashboard.load_notifications(address);
        if loaded.is_ok() {
            self.notifications = loaded.data;
        }
        self.last_refresh = Some(now);
        true
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_schedule() {
        let feed = NotificationFeed::new(Duration::from_secs(30));
        let start = Instant::now();
        assert!(feed.is_due(start));
        assert_eq!(feed.next_due_in(start), Duration::ZERO);

        let feed = NotificationFeed {
            last_refresh: Some(start),
            ..feed
        };
        assert!(!feed.is_due(start + Duration::from_secs(29)));
        assert_eq!(
            feed.next_due_in(start + Duration::from_secs(10)),
            Duration::from_secs(20)
        );
        assert!(feed.is_due(start + Duration::from_secs(30)));
    }
}
