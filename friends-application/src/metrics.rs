use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};

/// Command kinds reported under `untappd_friends_commands_total{kind=...}`.
pub const COMMAND_KINDS: [&str; 5] = [
    "recent_activity",
    "recent_badges",
    "user_summary",
    "help",
    "unknown",
];

#[derive(Debug, Default)]
pub struct Metrics {
    commands: [AtomicU64; COMMAND_KINDS.len()],
    command_failures: AtomicU64,
    attachments: AtomicU64,
    deliveries: AtomicU64,
    delivery_errors: AtomicU64,
}

impl Metrics {
    /// Unrecognized kinds are counted as `unknown`.
    pub fn record_command(&self, kind: &str) {
        let index = COMMAND_KINDS
            .iter()
            .position(|known| *known == kind)
            .unwrap_or(COMMAND_KINDS.len() - 1);
        self.commands[index].fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_command_failure(&self) {
        self.command_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_attachments(&self, count: usize) {
        self.attachments.fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn record_delivery(&self, ok: bool) {
        if ok {
            self.deliveries.fetch_add(1, Ordering::Relaxed);
        } else {
            self.delivery_errors.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn render_prometheus(&self) -> String {
        let mut out = String::from("# TYPE untappd_friends_commands_total counter\n");
        for (kind, counter) in COMMAND_KINDS.iter().zip(&self.commands) {
            let _ = writeln!(
                out,
                "untappd_friends_commands_total{{kind=\"{}\"}} {}",
                kind,
                counter.load(Ordering::Relaxed)
            );
        }

        for (name, counter) in [
            ("command_failures_total", &self.command_failures),
            ("attachments_total", &self.attachments),
            ("deliveries_total", &self.deliveries),
            ("delivery_errors_total", &self.delivery_errors),
        ] {
            let _ = write!(
                out,
                "# TYPE untappd_friends_{name} counter\nuntappd_friends_{name} {}\n",
                counter.load(Ordering::Relaxed)
            );
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_are_counted_per_kind() {
        let metrics = Metrics::default();
        metrics.record_command("recent_badges");
        metrics.record_command("recent_badges");
        metrics.record_command("user_summary");
        metrics.record_command("something_new");

        let rendered = metrics.render_prometheus();
        assert!(rendered.contains("untappd_friends_commands_total{kind=\"recent_badges\"} 2\n"));
        assert!(rendered.contains("untappd_friends_commands_total{kind=\"user_summary\"} 1\n"));
        assert!(rendered.contains("untappd_friends_commands_total{kind=\"recent_activity\"} 0\n"));
        assert!(rendered.contains("untappd_friends_commands_total{kind=\"help\"} 0\n"));
        assert!(rendered.contains("untappd_friends_commands_total{kind=\"unknown\"} 1\n"));
        assert_eq!(
            rendered.matches("# TYPE untappd_friends_commands_total counter").count(),
            1
        );
    }

    #[test]
    fn delivery_outcomes_are_split() {
        let metrics = Metrics::default();
        metrics.record_delivery(true);
        metrics.record_delivery(false);
        metrics.record_delivery(true);
        metrics.record_attachments(4);

        let rendered = metrics.render_prometheus();
        assert!(rendered.contains("untappd_friends_deliveries_total 2\n"));
        assert!(rendered.contains("untappd_friends_delivery_errors_total 1\n"));
        assert!(rendered.contains("untappd_friends_attachments_total 4\n"));
        assert!(rendered.contains("untappd_friends_command_failures_total 0\n"));
    }
}
