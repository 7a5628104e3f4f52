// SPDX-License-Identifier: GPL-3.0-or-later
use std::fmt;

use ndarray::{Array2, ArrayView2, Axis, Zip};
use serde::Deserialize;
use tracing::{debug, trace};

use crate::error::PipelineError;
use crate::grid::GridAxis;
use crate::temperature::{Temperature, TemperatureUnit};

/// The span of temperatures the sensor is trusted to report, in degrees Celsius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TemperatureRange {
    min: f32,
    max: f32,
}

impl TemperatureRange {
    pub fn new(min: Temperature, max: Temperature) -> Result<Self, PipelineError> {
        let min = min.in_celsius();
        let max = max.in_celsius();
        if !(min.is_finite() && max.is_finite()) || max <= min {
            return Err(PipelineError::InvalidConfig(format!(
                "temperature range {}°C to {}°C is empty",
                min, max
            )));
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    /// Limit a sample to this range. NaN samples end up at the minimum.
    pub fn clip(&self, sample: f32) -> f32 {
        sample.max(self.min).min(self.max)
    }
}

/// Which axes of the sensor grid to reverse before any processing.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
pub struct Orientation {
    /// Reverse the x axis (the first index).
    #[serde(default)]
    pub flip_horizontal: bool,

    /// Reverse the y axis (the second index).
    #[serde(default)]
    pub flip_vertical: bool,
}

/// Minimum, mean and maximum of a clipped frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Statistics {
    pub min: Temperature,
    pub avg: Temperature,
    pub max: Temperature,
}

impl Statistics {
    /// The statistics in the given unit, rounded to whole degrees.
    pub fn display_in(&self, unit: &TemperatureUnit) -> Self {
        Self {
            min: self.min.display_in(unit),
            avg: self.avg.display_in(unit),
            max: self.max.display_in(unit),
        }
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "min {} avg {} max {}", self.min, self.avg, self.max)
    }
}

/// Clips raw sensor frames and scales them into 0.0 to 1.0.
///
/// With autofocus enabled, each frame is stretched over its own minimum and maximum so the
/// whole palette is always in use. Otherwise the configured range maps onto the palette.
#[derive(Clone, Debug)]
pub struct FrameNormalizer {
    axis: GridAxis,
    range: TemperatureRange,
    autofocus: bool,
    orientation: Orientation,
    buffer: Array2<f32>,
}

impl FrameNormalizer {
    pub fn new(
        sensor_axis: GridAxis,
        range: TemperatureRange,
        autofocus: bool,
        orientation: Orientation,
    ) -> Result<Self, PipelineError> {
        if sensor_axis.is_empty() {
            return Err(PipelineError::InvalidConfig(format!(
                "sensor axis {}x{} has no cells",
                sensor_axis.width, sensor_axis.height
            )));
        }
        debug!(?sensor_axis, ?range, autofocus, ?orientation, "creating frame normalizer");
        Ok(Self {
            axis: sensor_axis,
            range,
            autofocus,
            orientation,
            buffer: Array2::zeros(sensor_axis.sample_shape()),
        })
    }

    pub fn axis(&self) -> GridAxis {
        self.axis
    }

    pub fn range(&self) -> TemperatureRange {
        self.range
    }

    pub fn autofocus(&self) -> bool {
        self.autofocus
    }

    /// The most recently normalized frame.
    pub fn normalized(&self) -> ArrayView2<'_, f32> {
        self.buffer.view()
    }

    /// Normalize a frame of Celsius samples, returning its statistics.
    ///
    /// The statistics are always in degrees Celsius of the clipped samples, regardless of
    /// autofocus. A uniform frame under autofocus normalizes to 0.0 everywhere.
    pub fn normalize(&mut self, samples: ArrayView2<'_, f32>) -> Result<Statistics, PipelineError> {
        self.axis.check_samples(&samples)?;
        let mut source = samples;
        if self.orientation.flip_horizontal {
            source.invert_axis(Axis(0));
        }
        if self.orientation.flip_vertical {
            source.invert_axis(Axis(1));
        }
        let range = self.range;
        Zip::from(&mut self.buffer)
            .and(&source)
            .for_each(|clipped, &sample| *clipped = range.clip(sample));

        let (min, max, sum) = self.buffer.iter().fold(
            (f32::INFINITY, f32::NEG_INFINITY, 0f64),
            |(min, max, sum), &value| (min.min(value), max.max(value), sum + value as f64),
        );
        let avg = (sum / self.buffer.len() as f64) as f32;
        trace!(min, avg, max, "frame statistics");

        if self.autofocus {
            let span = max - min;
            if span > 0.0 {
                self.buffer.mapv_inplace(|value| (value - min) / span);
            } else {
                trace!("uniform frame, normalizing to zero");
                self.buffer.fill(0.0);
            }
        } else {
            let span = range.max - range.min;
            self.buffer.mapv_inplace(|value| (value - range.min) / span);
        }
        Ok(Statistics {
            min: Temperature::Celsius(min),
            avg: Temperature::Celsius(avg),
            max: Temperature::Celsius(max),
        })
    }
}

#[cfg(test)]
mod test {
    use float_cmp::{approx_eq, F32Margin};
    use ndarray::{array, Array2};

    use super::{FrameNormalizer, Orientation, Statistics, TemperatureRange};
    use crate::error::PipelineError;
    use crate::grid::GridAxis;
    use crate::temperature::{Temperature, TemperatureUnit};

    fn range(min: f32, max: f32) -> TemperatureRange {
        TemperatureRange::new(Temperature::Celsius(min), Temperature::Celsius(max)).unwrap()
    }

    fn normalizer(width: usize, height: usize, autofocus: bool) -> FrameNormalizer {
        FrameNormalizer::new(
            GridAxis::new(width, height),
            range(0.0, 80.0),
            autofocus,
            Orientation::default(),
        )
        .unwrap()
    }

    #[test]
    fn statistics() {
        let mut normalizer = normalizer(2, 2, false);
        let stats = normalizer
            .normalize(array![[10.0, 20.0], [30.0, 40.0]].view())
            .unwrap();
        assert_eq!(
            stats,
            Statistics {
                min: Temperature::Celsius(10.0),
                avg: Temperature::Celsius(25.0),
                max: Temperature::Celsius(40.0),
            }
        );
    }

    #[test]
    fn fixed_range() {
        let mut normalizer = normalizer(2, 2, false);
        normalizer
            .normalize(array![[0.0, 20.0], [40.0, 80.0]].view())
            .unwrap();
        assert_eq!(normalizer.normalized(), array![[0.0f32, 0.25], [0.5, 1.0]]);
    }

    #[test]
    fn clipping() {
        let mut normalizer = normalizer(2, 2, false);
        let stats = normalizer
            .normalize(array![[-20.0, 10.0], [f32::NAN, 200.0]].view())
            .unwrap();
        assert_eq!(stats.min, Temperature::Celsius(0.0));
        assert_eq!(stats.max, Temperature::Celsius(80.0));
        let normalized = normalizer.normalized();
        assert_eq!(normalized[[0, 0]], 0.0);
        assert_eq!(normalized[[1, 0]], 0.0);
        assert_eq!(normalized[[1, 1]], 1.0);
    }

    #[test]
    fn autofocus_stretches() {
        let mut normalizer = normalizer(2, 2, true);
        let stats = normalizer
            .normalize(array![[20.0, 22.0], [24.0, 28.0]].view())
            .unwrap();
        assert_eq!(normalizer.normalized(), array![[0.0f32, 0.25], [0.5, 1.0]]);
        // Statistics are still absolute temperatures.
        assert_eq!(stats.min, Temperature::Celsius(20.0));
        assert_eq!(stats.max, Temperature::Celsius(28.0));
    }

    #[test]
    fn autofocus_uniform_frame() {
        let mut normalizer = normalizer(3, 2, true);
        let stats = normalizer
            .normalize(Array2::from_elem((3, 2), 21.5f32).view())
            .unwrap();
        assert!(normalizer.normalized().iter().all(|v| *v == 0.0));
        assert_eq!(stats.avg, Temperature::Celsius(21.5));
    }

    #[test]
    fn bounds() {
        let samples = Array2::from_shape_fn((8, 8), |(x, y)| (x * 17 + y * 13) as f32 - 30.0);
        for autofocus in [true, false].iter() {
            let mut normalizer = normalizer(8, 8, *autofocus);
            normalizer.normalize(samples.view()).unwrap();
            assert!(normalizer
                .normalized()
                .iter()
                .all(|v| (0.0..=1.0).contains(v)));
        }
    }

    #[test]
    fn flips() {
        let mut normalizer = FrameNormalizer::new(
            GridAxis::new(2, 2),
            range(0.0, 80.0),
            false,
            Orientation {
                flip_horizontal: true,
                flip_vertical: true,
            },
        )
        .unwrap();
        normalizer
            .normalize(array![[0.0, 20.0], [40.0, 80.0]].view())
            .unwrap();
        assert_eq!(normalizer.normalized(), array![[1.0f32, 0.5], [0.25, 0.0]]);
    }

    #[test]
    fn wrong_shape() {
        let mut normalizer = normalizer(2, 2, false);
        let result = normalizer.normalize(Array2::<f32>::zeros((2, 3)).view());
        assert_eq!(
            result,
            Err(PipelineError::InputShape {
                expected: (2, 2),
                actual: (2, 3)
            })
        );
    }

    #[test]
    fn empty_range() {
        let celsius = Temperature::Celsius;
        assert!(TemperatureRange::new(celsius(30.0), celsius(30.0)).is_err());
        assert!(TemperatureRange::new(celsius(40.0), celsius(30.0)).is_err());
    }

    #[test]
    fn fahrenheit_range() {
        let range =
            TemperatureRange::new(Temperature::Fahrenheit(32.0), Temperature::Fahrenheit(212.0))
                .unwrap();
        assert!(approx_eq!(f32, range.min(), 0.0, F32Margin::default()));
        assert!(approx_eq!(f32, range.max(), 100.0, F32Margin::default()));
    }

    #[test]
    fn statistics_display() {
        let stats = Statistics {
            min: Temperature::Celsius(10.0),
            avg: Temperature::Celsius(25.0),
            max: Temperature::Celsius(40.0),
        };
        assert_eq!(
            stats.display_in(&TemperatureUnit::Fahrenheit).to_string(),
            "min 50°F avg 77°F max 104°F"
        );
    }
}
