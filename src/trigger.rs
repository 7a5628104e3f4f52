// SPDX-License-Identifier: GPL-3.0-or-later
//! Alarm and motion detection over successive frame statistics.
use serde::Deserialize;
use tracing::debug;

use crate::frame::Statistics;
use crate::temperature::Temperature;

fn default_alarm() -> Temperature {
    Temperature::Fahrenheit(120.0)
}

fn default_motion_threshold() -> f32 {
    1.5
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
pub struct TriggerSettings {
    /// The maximum temperature at or above which the alarm goes off.
    #[serde(default = "default_alarm")]
    pub alarm: Temperature,

    /// How far (in Celsius degrees) the maximum has to rise over the previous frame's maximum to
    /// count as motion.
    #[serde(default = "default_motion_threshold")]
    pub motion_threshold: f32,
}

impl Default for TriggerSettings {
    fn default() -> Self {
        Self {
            alarm: default_alarm(),
            motion_threshold: default_motion_threshold(),
        }
    }
}

/// The triggers a single frame set off.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Triggers {
    pub alarm: bool,
    pub motion: bool,
}

impl Triggers {
    /// Whether either trigger went off, meaning a snapshot should be exported.
    pub fn any(&self) -> bool {
        self.alarm || self.motion
    }
}

#[derive(Clone, Debug)]
pub struct TriggerMonitor {
    alarm: f32,
    motion_threshold: f32,
    previous_max: f32,
}

impl TriggerMonitor {
    pub fn new(settings: &TriggerSettings) -> Self {
        Self {
            alarm: settings.alarm.in_celsius(),
            motion_threshold: settings.motion_threshold,
            // Starting from 0°C means the first frame of any warm scene counts as motion.
            previous_max: 0.0,
        }
    }

    /// Check a frame's statistics, remembering its maximum for the next check.
    pub fn check(&mut self, statistics: &Statistics) -> Triggers {
        let max = statistics.max.in_celsius();
        let triggers = Triggers {
            alarm: max >= self.alarm,
            motion: max > self.previous_max + self.motion_threshold,
        };
        if triggers.any() {
            debug!(max, previous_max = self.previous_max, ?triggers, "triggered");
        }
        self.previous_max = max;
        triggers
    }
}
