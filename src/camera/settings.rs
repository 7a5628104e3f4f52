// SPDX-License-Identifier: GPL-3.0-or-later
use std::path::PathBuf;

use serde::Deserialize;
use tracing::debug;

use crate::error::PipelineError;
use crate::frame::{Orientation, TemperatureRange};
use crate::grid::GridAxis;
use crate::temperature::Temperature;

use super::{RampCamera, RecordedCamera, RepeatMode, ThermalCamera};

fn default_sensor_side() -> usize {
    8
}

fn default_true() -> bool {
    true
}

fn default_range_min() -> Temperature {
    Temperature::Celsius(0.0)
}

fn default_range_max() -> Temperature {
    Temperature::Celsius(80.0)
}

/// Settings shared by every kind of camera.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
pub struct CommonCameraSettings {
    #[serde(default = "default_sensor_side")]
    pub width: usize,

    #[serde(default = "default_sensor_side")]
    pub height: usize,

    /// Double the resolution of each frame with bilinear interpolation.
    #[serde(default = "default_true")]
    pub interpolate: bool,

    /// Samples below this are clipped up to it.
    #[serde(default = "default_range_min")]
    pub range_min: Temperature,

    /// Samples above this are clipped down to it.
    #[serde(default = "default_range_max")]
    pub range_max: Temperature,

    /// Stretch every frame across the whole palette instead of the fixed range.
    #[serde(default = "default_true")]
    pub autofocus: bool,

    #[serde(flatten)]
    pub orientation: Orientation,
}

impl Default for CommonCameraSettings {
    fn default() -> Self {
        Self {
            width: default_sensor_side(),
            height: default_sensor_side(),
            interpolate: true,
            range_min: default_range_min(),
            range_max: default_range_max(),
            autofocus: true,
            orientation: Orientation::default(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase", tag = "kind")]
pub enum CameraSettings {
    /// A synthetic camera that always sees the same ramp across the operating range.
    Ramp {
        #[serde(flatten)]
        common: CommonCameraSettings,
    },
    /// Frames replayed from a TOML recording.
    Recorded {
        path: PathBuf,

        #[serde(default)]
        repeat: RepeatMode,

        #[serde(flatten)]
        common: CommonCameraSettings,
    },
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self::Ramp {
            common: CommonCameraSettings::default(),
        }
    }
}

impl CameraSettings {
    /// Convenience method for accessing common camera settings.
    pub fn common(&self) -> &CommonCameraSettings {
        match self {
            Self::Ramp { common } => common,
            Self::Recorded { common, .. } => common,
        }
    }

    pub fn sensor_axis(&self) -> GridAxis {
        let common = self.common();
        GridAxis::new(common.width, common.height)
    }

    /// The size of the rendered grid, after any interpolation.
    pub fn grid_axis(&self) -> GridAxis {
        GridAxis::from_sensor(self.sensor_axis(), self.common().interpolate)
    }

    pub fn temperature_range(&self) -> Result<TemperatureRange, PipelineError> {
        let common = self.common();
        TemperatureRange::new(common.range_min, common.range_max)
    }

    pub fn create_camera(&self) -> anyhow::Result<Box<dyn ThermalCamera + Send>> {
        let sensor_axis = self.sensor_axis();
        debug!(?sensor_axis, "creating camera");
        Ok(match self {
            Self::Ramp { common } => Box::new(RampCamera::new(
                sensor_axis,
                common.range_max.in_celsius(),
            )),
            Self::Recorded { path, repeat, .. } => {
                let camera = RecordedCamera::open(path, *repeat)?;
                if camera.sensor_axis() != sensor_axis {
                    anyhow::bail!(
                        "{} holds {}x{} frames, but the camera is configured for {}x{}",
                        path.display(),
                        camera.sensor_axis().width,
                        camera.sensor_axis().height,
                        sensor_axis.width,
                        sensor_axis.height
                    );
                }
                Box::new(camera)
            }
        })
    }
}
