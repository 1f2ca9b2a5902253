//! Playback store.
//!
//! Holds a finished step list and a cursor into it. Timing is left to the
//! caller: drive [`PlaybackStore::tick`] every [`PlaybackStore::tick_interval`]
//! while the status is `Playing`.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use stepwise_trace::AlgorithmStep;

pub const MIN_SPEED: f64 = 0.25;
pub const MAX_SPEED: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackStatus {
    Idle,
    Playing,
    Paused,
    Completed,
}

/// Snapshot of the store, as exposed to a renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackState {
    pub status: PlaybackStatus,
    pub current_step_index: usize,
    pub total_steps: usize,
    pub speed: f64,
}

#[derive(Debug, Clone)]
pub struct PlaybackStore {
    steps: Vec<AlgorithmStep>,
    index: usize,
    status: PlaybackStatus,
    speed: f64,
}

impl Default for PlaybackStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackStore {
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            index: 0,
            status: PlaybackStatus::Idle,
            speed: 1.0,
        }
    }

    /// Replace the step list, rewinding to the first step.
    pub fn set_steps(&mut self, steps: Vec<AlgorithmStep>) {
        self.steps = steps;
        self.index = 0;
        self.status = PlaybackStatus::Idle;
    }

    pub fn steps(&self) -> &[AlgorithmStep] {
        &self.steps
    }

    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn current_step_index(&self) -> usize {
        self.index
    }

    pub fn current_step(&self) -> Option<&AlgorithmStep> {
        self.steps.get(self.index)
    }

    pub fn state(&self) -> PlaybackState {
        PlaybackState {
            status: self.status,
            current_step_index: self.index,
            total_steps: self.steps.len(),
            speed: self.speed,
        }
    }

    fn last_index(&self) -> Option<usize> {
        self.steps.len().checked_sub(1)
    }

    fn at_end(&self) -> bool {
        self.last_index() == Some(self.index)
    }

    pub fn play(&mut self) {
        if self.steps.is_empty() {
            return;
        }
        self.status = if self.at_end() {
            PlaybackStatus::Completed
        } else {
            PlaybackStatus::Playing
        };
    }

    pub fn pause(&mut self) {
        if self.status == PlaybackStatus::Playing {
            self.status = PlaybackStatus::Paused;
        }
    }

    pub fn step_forward(&mut self) {
        let Some(last) = self.last_index() else {
            return;
        };
        if self.index < last {
            self.index += 1;
        }
        self.status = if self.index == last {
            PlaybackStatus::Completed
        } else if self.status == PlaybackStatus::Playing {
            PlaybackStatus::Playing
        } else {
            PlaybackStatus::Paused
        };
    }

    pub fn step_backward(&mut self) {
        if self.steps.is_empty() {
            return;
        }
        self.index = self.index.saturating_sub(1);
        self.status = PlaybackStatus::Paused;
    }

    pub fn reset(&mut self) {
        self.index = 0;
        self.status = PlaybackStatus::Idle;
    }

    /// Set the playback speed multiplier, clamped to `[0.25, 4.0]`.
    ///
    /// Non-finite values are ignored.
    pub fn set_speed(&mut self, speed: f64) {
        if speed.is_finite() {
            self.speed = speed.clamp(MIN_SPEED, MAX_SPEED);
        }
    }

    /// Jump to `index`, clamped to the step range.
    pub fn set_current_step_index(&mut self, index: usize) {
        let Some(last) = self.last_index() else {
            self.index = 0;
            self.status = PlaybackStatus::Idle;
            return;
        };
        self.index = index.min(last);
        if self.index == last {
            self.status = PlaybackStatus::Completed;
        } else if self.status == PlaybackStatus::Completed {
            self.status = PlaybackStatus::Paused;
        }
    }

    /// Advance one step if playing. Returns whether the cursor moved.
    pub fn tick(&mut self) -> bool {
        if self.status != PlaybackStatus::Playing {
            return false;
        }
        let Some(last) = self.last_index() else {
            self.status = PlaybackStatus::Idle;
            return false;
        };
        if self.index < last {
            self.index += 1;
        }
        if self.index == last {
            self.status = PlaybackStatus::Completed;
        }
        true
    }

    /// Time between ticks at the current speed.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.speed)
    }
}
