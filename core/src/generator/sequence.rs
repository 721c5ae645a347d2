use alloc::vec::Vec;

use super::*;

/// Replays a fixed list of unit draws, wrapping around once exhausted.
#[derive(Clone, Debug, PartialEq)]
pub struct SequenceSource {
    draws: Vec<f64>,
    cursor: usize,
}

impl SequenceSource {
    /// Values are clamped into `[0, 1)`; an empty list always draws `0.0`.
    pub fn new(draws: Vec<f64>) -> Self {
        let draws = draws
            .into_iter()
            .map(|value| {
                if value.is_nan() {
                    0.0
                } else {
                    value.clamp(0.0, 1.0 - f64::EPSILON)
                }
            })
            .collect();
        Self { draws, cursor: 0 }
    }

    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for SequenceSource {
    fn next_unit(&mut self) -> f64 {
        if self.draws.is_empty() {
            return 0.0;
        }
        let value = self.draws[self.cursor % self.draws.len()];
        self.cursor += 1;
        value
    }
}
