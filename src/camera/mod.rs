// SPDX-License-Identifier: GPL-3.0-or-later
//! Sources of raw temperature frames.
use crate::grid::{GridAxis, SampleGrid};

mod ramp;
mod recorded;
mod settings;

pub use ramp::RampCamera;
pub use recorded::{RecordedCamera, RecordedFrame, RepeatMode};
pub use settings::{CameraSettings, CommonCameraSettings};

/// The operations a thermal camera needs to have to feed the frame pipeline.
pub trait ThermalCamera {
    /// The dimensions of every frame this camera returns.
    fn sensor_axis(&self) -> GridAxis;

    /// Read one frame of temperatures in degrees Celsius, shaped `(width, height)`.
    fn acquire(&mut self) -> anyhow::Result<SampleGrid>;
}
