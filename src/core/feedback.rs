//! Bounded presentation feeds: floating texts, the combat log and DPS.
//!
//! Entries are buffered every tick and only become visible when the
//! engine flushes on a render tick.

use super::constants::*;
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKind {
    Damage,
    Crit,
    Miss,
    Gold,
    Heal,
    Skill,
    LevelUp,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FloatingText {
    pub id: u64,
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub kind: TextKind,
    pub spawn_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    Info,
    Reward,
    Warning,
    Rejected,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub id: u64,
    pub message: String,
    pub kind: LogKind,
}

#[derive(Debug, Default)]
pub struct Feedback {
    next_id: u64,
    pending_texts: Vec<FloatingText>,
    texts: Vec<FloatingText>,
    pending_log: Vec<LogEntry>,
    /// Newest first
    log: VecDeque<LogEntry>,
}

impl Feedback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffers a floating text. Drops it if the buffer is full.
    pub fn float(&mut self, text: impl Into<String>, x: f64, y: f64, kind: TextKind, now_ms: u64) {
        if self.pending_texts.len() >= FLOATING_TEXT_BUFFER_CAP {
            return;
        }
        let id = self.bump_id();
        self.pending_texts.push(FloatingText {
            id,
            text: text.into(),
            x,
            y,
            kind,
            spawn_ms: now_ms,
        });
    }

    pub fn log(&mut self, message: impl Into<String>, kind: LogKind) {
        let id = self.bump_id();
        self.pending_log.push(LogEntry {
            id,
            message: message.into(),
            kind,
        });
    }

    /// Publishes buffered entries and trims both feeds to their caps.
    pub fn flush(&mut self, now_ms: u64) {
        self.texts.append(&mut self.pending_texts);
        self.texts
            .retain(|t| now_ms.saturating_sub(t.spawn_ms) < FLOATING_TEXT_LIFETIME_MS);
        if self.texts.len() > FLOATING_TEXT_CAP {
            let excess = self.texts.len() - FLOATING_TEXT_CAP;
            self.texts.drain(..excess);
        }

        for entry in self.pending_log.drain(..) {
            self.log.push_front(entry);
        }
        self.log.truncate(COMBAT_LOG_CAP);
    }

    pub fn texts(&self) -> &[FloatingText] {
        &self.texts
    }

    pub fn log_entries(&self) -> &VecDeque<LogEntry> {
        &self.log
    }

    /// Empties both feeds, published and pending.
    pub fn clear(&mut self) {
        self.pending_texts.clear();
        self.texts.clear();
        self.pending_log.clear();
        self.log.clear();
    }

    fn bump_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Rolling one-second damage sum, resampled twice a second.
#[derive(Debug, Default)]
pub struct DpsMeter {
    hits: VecDeque<(u64, f64)>,
    last_sample_ms: u64,
    value: f64,
}

impl DpsMeter {
    pub fn record(&mut self, now_ms: u64, damage: f64) {
        self.hits.push_back((now_ms, damage));
    }

    pub fn update(&mut self, now_ms: u64) {
        while let Some(&(t, _)) = self.hits.front() {
            if now_ms.saturating_sub(t) < DPS_WINDOW_MS {
                break;
            }
            self.hits.pop_front();
        }
        if now_ms.saturating_sub(self.last_sample_ms) > DPS_SAMPLE_INTERVAL_MS {
            self.value = self.hits.iter().map(|(_, d)| d).sum();
            self.last_sample_ms = now_ms;
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nothing_visible_before_flush() {
        let mut feedback = Feedback::new();
        feedback.float("12", 0.0, 0.0, TextKind::Damage, 0);
        feedback.log("Wave 1 Spawned!", LogKind::Info);
        assert!(feedback.texts().is_empty());
        assert!(feedback.log_entries().is_empty());

        feedback.flush(0);
        assert_eq!(feedback.texts().len(), 1);
        assert_eq!(feedback.log_entries().len(), 1);
    }

    #[test]
    fn test_caps_and_lifetime() {
        let mut feedback = Feedback::new();
        for i in 0..60 {
            feedback.float(format!("{i}"), 0.0, 0.0, TextKind::Damage, 100);
            feedback.log(format!("line {i}"), LogKind::Info);
        }
        feedback.flush(100);
        // Buffer kept 50, visible keeps the last 20
        assert_eq!(feedback.texts().len(), 20);
        assert_eq!(feedback.texts()[19].text, "49");
        assert_eq!(feedback.log_entries().len(), 50);
        assert_eq!(feedback.log_entries()[0].message, "line 59");

        feedback.flush(1_100);
        assert!(feedback.texts().is_empty());
    }

    #[test]
    fn test_clear_drops_pending_and_published() {
        let mut feedback = Feedback::new();
        feedback.float("7", 0.0, 0.0, TextKind::Damage, 0);
        feedback.log("Wave 1 Spawned!", LogKind::Info);
        feedback.flush(0);
        feedback.log("Wave 2 Spawned!", LogKind::Info);

        feedback.clear();
        feedback.flush(0);
        assert!(feedback.texts().is_empty());
        assert!(feedback.log_entries().is_empty());
    }

    #[test]
    fn test_dps_window() {
        let mut dps = DpsMeter::default();
        dps.record(0, 100.0);
        dps.record(400, 50.0);
        dps.update(600);
        assert_eq!(dps.value(), 150.0);
        dps.update(1_200);
        assert_eq!(dps.value(), 50.0);
    }
}
