use crate::domain::{Task, TaskId};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::time::{Duration, Instant};

/// Overdue detection that notifies once per overdue transition
pub struct OverdueNotifier {
    /// Tasks already reported as overdue this session
    flagged: HashSet<TaskId>,
    interval: Duration,
    /// When the current interval timer was (re)started
    timer_started: Option<Instant>,
    /// Store revision the timer was started for
    watched_revision: Option<u64>,
}

impl OverdueNotifier {
    pub fn new(interval: Duration) -> Self {
        Self {
            flagged: HashSet::new(),
            interval,
            timer_started: None,
            watched_revision: None,
        }
    }

    #[cfg(test)]
    pub fn is_flagged(&self, id: &str) -> bool {
        self.flagged.contains(id)
    }

    /// Run one check. Returns true if any task became overdue since the last check.
    pub fn check(&mut self, tasks: &[Task], now: DateTime<Utc>) -> bool {
        let mut newly_flagged = false;

        for task in tasks {
            if task.is_overdue(now) {
                if !self.flagged.contains(&task.id) {
                    self.flagged.insert(task.id.clone());
                    newly_flagged = true;
                }
            } else {
                // Re-arm so the task notifies again if it goes overdue later
                self.flagged.remove(&task.id);
            }
        }

        // Deleted tasks never come back
        self.flagged.retain(|id| tasks.iter().any(|t| &t.id == id));

        if newly_flagged {
            tracing::info!(flagged = self.flagged.len(), "tasks became overdue");
        }
        newly_flagged
    }

    /// Drive the notifier from the event loop.
    ///
    /// Checks immediately whenever the store revision changes (restarting the
    /// interval), and otherwise once per interval.
    pub fn poll(
        &mut self,
        tasks: &[Task],
        revision: u64,
        now: DateTime<Utc>,
        instant: Instant,
    ) -> bool {
        let list_changed = self.watched_revision != Some(revision);
        let timer_due = self
            .timer_started
            .map_or(true, |started| instant.duration_since(started) >= self.interval);

        if !list_changed && !timer_due {
            return false;
        }

        self.watched_revision = Some(revision);
        self.timer_started = Some(instant);
        self.check(tasks, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overdue_task(now: DateTime<Utc>) -> Task {
        Task::new(
            "Submit report".to_string(),
            Some(now - chrono::Duration::seconds(1)),
        )
    }

    #[test]
    fn test_flags_overdue_task_once() {
        let now = Utc::now();
        let tasks = vec![overdue_task(now)];
        let mut notifier = OverdueNotifier::new(Duration::from_secs(5));

        assert!(notifier.check(&tasks, now));
        assert!(notifier.is_flagged(&tasks[0].id));
        for _ in 0..5 {
            assert!(!notifier.check(&tasks, now));
        }
    }

    #[test]
    fn test_completion_unflags_and_rearms() {
        let now = Utc::now();
        let mut tasks = vec![overdue_task(now)];
        let mut notifier = OverdueNotifier::new(Duration::from_secs(5));

        assert!(notifier.check(&tasks, now));

        tasks[0].completed = true;
        assert!(!notifier.check(&tasks, now));
        assert!(!notifier.is_flagged(&tasks[0].id));

        // Unchecking puts it back in the overdue state: notify again
        tasks[0].completed = false;
        assert!(notifier.check(&tasks, now));
    }

    #[test]
    fn test_due_date_change_rearms() {
        let now = Utc::now();
        let mut tasks = vec![overdue_task(now)];
        let mut notifier = OverdueNotifier::new(Duration::from_secs(5));
        notifier.check(&tasks, now);

        tasks[0].due_date = Some(now + chrono::Duration::hours(1));
        assert!(!notifier.check(&tasks, now));
        assert!(!notifier.is_flagged(&tasks[0].id));

        let later = now + chrono::Duration::hours(2);
        assert!(notifier.check(&tasks, later));
    }

    #[test]
    fn test_single_notification_for_many_tasks() {
        let now = Utc::now();
        let tasks = vec![overdue_task(now), overdue_task(now), overdue_task(now)];
        let mut notifier = OverdueNotifier::new(Duration::from_secs(5));

        assert!(notifier.check(&tasks, now));
        assert!(tasks.iter().all(|t| notifier.is_flagged(&t.id)));
        assert!(!notifier.check(&tasks, now));
    }

    #[test]
    fn test_task_becomes_overdue_as_time_passes() {
        let now = Utc::now();
        let tasks = vec![Task::new(
            "Later".to_string(),
            Some(now + chrono::Duration::seconds(3)),
        )];
        let mut notifier = OverdueNotifier::new(Duration::from_secs(5));

        assert!(!notifier.check(&tasks, now));
        assert!(notifier.check(&tasks, now + chrono::Duration::seconds(10)));
    }

    #[test]
    fn test_poll_runs_on_change_and_on_interval() {
        let now = Utc::now();
        let start = Instant::now();
        let tasks = vec![Task::new(
            "Soon".to_string(),
            Some(now + chrono::Duration::seconds(2)),
        )];
        let mut notifier = OverdueNotifier::new(Duration::from_secs(5));

        // First poll always checks
        assert!(!notifier.poll(&tasks, 0, now, start));

        // Before the interval elapses nothing is re-checked, even though the task is now overdue
        let t1 = now + chrono::Duration::seconds(3);
        assert!(!notifier.poll(&tasks, 0, t1, start + Duration::from_secs(3)));
        assert!(!notifier.is_flagged(&tasks[0].id));

        // Interval elapsed: check fires
        assert!(notifier.poll(&tasks, 0, t1, start + Duration::from_secs(5)));
    }

    #[test]
    fn test_poll_checks_immediately_on_revision_change() {
        let now = Utc::now();
        let start = Instant::now();
        let mut tasks: Vec<Task> = Vec::new();
        let mut notifier = OverdueNotifier::new(Duration::from_secs(5));

        assert!(!notifier.poll(&tasks, 0, now, start));

        tasks.push(overdue_task(now));
        let soon = start + Duration::from_millis(250);
        assert!(notifier.poll(&tasks, 1, now, soon));

        // Timer restarted at `soon`: a poll 4.9s later is not due
        assert!(!notifier.poll(&tasks, 1, now, soon + Duration::from_millis(4900)));
    }

    #[test]
    fn test_deleted_tasks_are_forgotten() {
        let now = Utc::now();
        let mut tasks = vec![overdue_task(now)];
        let id = tasks[0].id.clone();
        let mut notifier = OverdueNotifier::new(Duration::from_secs(5));
        notifier.check(&tasks, now);

        tasks.clear();
        notifier.check(&tasks, now);
        assert!(!notifier.is_flagged(&id));
    }
}
