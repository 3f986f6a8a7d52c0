//! A fixed-capacity rolling window of game outcomes, used to judge whether the
//! learner is ready for curriculum promotion against its current opponent (§4.H).

use std::collections::VecDeque;

pub struct RollingWindow {
    capacity: usize,
    results: VecDeque<bool>,
    wins: usize,
}

impl RollingWindow {
    pub fn new(capacity: usize) -> RollingWindow {
        RollingWindow {
            capacity,
            results: VecDeque::with_capacity(capacity),
            wins: 0,
        }
    }

    pub fn record(&mut self, won: bool) {
        if self.results.len() == self.capacity {
            if let Some(evicted) = self.results.pop_front() {
                if evicted {
                    self.wins -= 1;
                }
            }
        }
        if won {
            self.wins += 1;
        }
        self.results.push_back(won);
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.results.len() == self.capacity
    }

    pub fn win_rate(&self) -> f32 {
        if self.results.is_empty() {
            0.0
        } else {
            self.wins as f32 / self.results.len() as f32
        }
    }

    pub fn clear(&mut self) {
        self.results.clear();
        self.wins = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn win_rate_tracks_a_sliding_window() {
        let mut w = RollingWindow::new(3);
        w.record(true);
        w.record(true);
        w.record(false);
        assert!((w.win_rate() - 2.0 / 3.0).abs() < 1e-6);

        w.record(false); // evicts the oldest `true`
        assert!((w.win_rate() - 1.0 / 3.0).abs() < 1e-6);
        assert!(w.is_full());
    }
}
