//! Bounded conversation history

use super::entities::Turn;
use std::collections::VecDeque;
use std::num::NonZeroUsize;

/// Ordered log of turns, oldest first, capped at `max_turns`.
///
/// Appending past the cap evicts from the front, so the newest turn is
/// always present right after its own append.
#[derive(Debug, Clone)]
pub struct SessionHistory {
    turns: VecDeque<Turn>,
    max_turns: NonZeroUsize,
}

impl SessionHistory {
    pub fn new(max_turns: NonZeroUsize) -> Self {
        Self {
            turns: VecDeque::with_capacity(max_turns.get().min(64)),
            max_turns,
        }
    }

    pub fn append(&mut self, turn: Turn) {
        self.turns.push_back(turn);
        while self.turns.len() > self.max_turns.get() {
            self.turns.pop_front();
        }
    }

    /// Snapshot of the turns in insertion order.
    pub fn as_sequence(&self) -> Vec<Turn> {
        self.turns.iter().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Turn> {
        self.turns.iter()
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.back()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn max_turns(&self) -> usize {
        self.max_turns.get()
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::entities::Speaker;
    use std::time::{Duration, Instant};

    fn cap(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn texts(history: &SessionHistory) -> Vec<String> {
        history
            .as_sequence()
            .iter()
            .map(|t| t.text().to_string())
            .collect()
    }

    #[test]
    fn test_evicts_oldest_first() {
        let now = Instant::now();
        let mut history = SessionHistory::new(cap(3));
        for text in ["A", "B", "C", "D"] {
            history.append(Turn::user(text, now));
        }

        assert_eq!(texts(&history), vec!["B", "C", "D"]);
    }

    #[test]
    fn test_length_never_exceeds_cap() {
        let now = Instant::now();
        let mut history = SessionHistory::new(cap(5));
        for i in 0..37 {
            let text = format!("turn {}", i);
            history.append(Turn::user(text.clone(), now));
            assert!(history.len() <= 5);
            assert_eq!(history.last().unwrap().text(), text);
        }
        assert_eq!(history.len(), 5);
    }

    #[test]
    fn test_sequence_preserves_speaker_text_and_order() {
        let start = Instant::now();
        let mut history = SessionHistory::new(cap(10));
        history.append(Turn::user("What is Rust?", start));
        history.append(Turn::assistant(
            "A systems language.",
            start + Duration::from_secs(1),
        ));

        let seq = history.as_sequence();
        assert_eq!(seq.len(), 2);
        assert_eq!(seq[0].speaker(), Speaker::User);
        assert_eq!(seq[0].text(), "What is Rust?");
        assert_eq!(seq[1].speaker(), Speaker::Assistant);
        assert_eq!(seq[1].text(), "A systems language.");
        assert!(seq[0].timestamp() < seq[1].timestamp());
    }

    #[test]
    fn test_cap_of_one_keeps_only_latest() {
        let now = Instant::now();
        let mut history = SessionHistory::new(cap(1));
        history.append(Turn::user("first", now));
        history.append(Turn::assistant("second", now));
        assert_eq!(texts(&history), vec!["second"]);
    }

    #[test]
    fn test_clear() {
        let mut history = SessionHistory::new(cap(2));
        history.append(Turn::user("hi", Instant::now()));
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.max_turns(), 2);
    }
}
