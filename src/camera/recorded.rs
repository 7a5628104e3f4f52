// SPDX-License-Identifier: GPL-3.0-or-later
use std::convert::TryFrom;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::{anyhow, bail, Context as _};
use ndarray::Array2;
use serde::de::{Deserialize, IntoDeserializer};
use tracing::{debug, trace, warn};

use crate::grid::{GridAxis, SampleGrid};

use super::ThermalCamera;

/// A single recorded frame, as stored in a recording file.
///
/// ```toml
/// [[frames]]
/// width = 2
/// height = 2
/// values = [20.0, 21.0, 22.5, 30.0]
/// ```
///
/// `values` runs along the second axis first, so `values[x * height + y]` is the sample at
/// `(x, y)`.
#[derive(Clone, Debug, serde::Deserialize, PartialEq)]
#[serde(try_from = "RawFrame")]
pub struct RecordedFrame(SampleGrid);

#[derive(serde::Deserialize)]
struct RawFrame {
    width: usize,
    height: usize,
    values: Vec<f32>,
}

impl TryFrom<RawFrame> for RecordedFrame {
    type Error = String;

    fn try_from(raw: RawFrame) -> Result<Self, Self::Error> {
        let RawFrame {
            width,
            height,
            values,
        } = raw;
        let value_count = values.len();
        Array2::from_shape_vec((width, height), values)
            .map(Self)
            .map_err(|_| {
                format!(
                    "a {}x{} frame needs {} values, found {}",
                    width,
                    height,
                    width * height,
                    value_count
                )
            })
    }
}

impl From<RecordedFrame> for SampleGrid {
    fn from(frame: RecordedFrame) -> Self {
        frame.0
    }
}

#[derive(serde::Deserialize)]
struct Recording {
    frames: Vec<RecordedFrame>,
}

/// Controls how frames are repeated by [`RecordedCamera`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    /// Play the frames once.
    ///
    /// Once the end of the frames has been reached, an error is returned.
    Once,

    /// Loop over the frames. This is the default mode.
    Loop,

    /// Alternate between forward and reverse playback.
    ///
    /// The frames at either end are *not* repeated when the direction changes.
    Bounce,
}

impl Default for RepeatMode {
    fn default() -> Self {
        Self::Loop
    }
}

impl FromStr for RepeatMode {
    type Err = serde::de::value::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RepeatMode::deserialize(s.into_deserializer())
    }
}

impl fmt::Display for RepeatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RepeatMode::Once => "once",
            RepeatMode::Loop => "loop",
            RepeatMode::Bounce => "bounce",
        };
        write!(f, "{}", s)
    }
}

/// Replays previously recorded frames.
pub struct RecordedCamera {
    axis: GridAxis,
    frames: Vec<SampleGrid>,
    index: Box<dyn Iterator<Item = usize> + Send + Sync>,
}

impl RecordedCamera {
    pub fn new(frames: Vec<SampleGrid>, repeat: RepeatMode) -> anyhow::Result<Self> {
        let axis: GridAxis = frames
            .first()
            .ok_or_else(|| anyhow!("A recording needs at least one frame"))?
            .dim()
            .into();
        if let Some(position) = frames.iter().position(|f| f.dim() != axis.sample_shape()) {
            bail!(
                "Frame {} is {:?}, but the recording started with {}x{} frames",
                position,
                frames[position].dim(),
                axis.width,
                axis.height
            );
        }
        let frame_count = frames.len();
        let index: Box<dyn Iterator<Item = usize> + Send + Sync> = match repeat {
            RepeatMode::Once => Box::new(0..frame_count),
            RepeatMode::Loop => Box::new((0..frame_count).cycle()),
            RepeatMode::Bounce => {
                let forwards = 0..frame_count;
                let backwards = (1..frame_count.saturating_sub(1)).rev();
                Box::new(forwards.chain(backwards).cycle())
            }
        };
        debug!(frame_count, ?axis, %repeat, "loaded recording");
        Ok(Self {
            axis,
            frames,
            index,
        })
    }

    /// Parse a TOML recording with one `[[frames]]` table per frame.
    pub fn from_toml(source: &str, repeat: RepeatMode) -> anyhow::Result<Self> {
        let recording: Recording =
            toml::from_str(source).context("Unable to parse recorded frames")?;
        Self::new(
            recording.frames.into_iter().map(SampleGrid::from).collect(),
            repeat,
        )
    }

    pub fn open<P: AsRef<Path>>(path: P, repeat: RepeatMode) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Unable to read recording {}", path.display()))?;
        Self::from_toml(&source, repeat)
            .with_context(|| format!("Invalid recording {}", path.display()))
    }
}

impl fmt::Debug for RecordedCamera {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordedCamera")
            .field("axis", &self.axis)
            .field("frames", &self.frames.len())
            .finish()
    }
}

impl ThermalCamera for RecordedCamera {
    fn sensor_axis(&self) -> GridAxis {
        self.axis
    }

    fn acquire(&mut self) -> anyhow::Result<SampleGrid> {
        match self.index.next() {
            Some(index) => {
                trace!(index, "replaying frame");
                Ok(self.frames[index].clone())
            }
            None => {
                warn!("recording has run out of frames");
                Err(anyhow!("No more frames in recording"))
            }
        }
    }
}

#[cfg(test)]
mod test {
    use std::io::Write;

    use ndarray::{array, Array2};

    use super::{RecordedCamera, RepeatMode};
    use crate::camera::ThermalCamera;
    use crate::grid::{GridAxis, SampleGrid};

    const NUM_TINY_FRAMES: usize = 5;

    fn tiny_frames() -> Vec<SampleGrid> {
        (0..NUM_TINY_FRAMES)
            .map(|offset| Array2::from_elem((1, 1), 20.0 + offset as f32))
            .collect()
    }

    fn played_values(repeat: RepeatMode) -> Vec<f32> {
        let mut cam = RecordedCamera::new(tiny_frames(), repeat).unwrap();
        std::iter::from_fn(move || cam.acquire().ok())
            .fuse()
            .take(12)
            .map(|frame| frame[[0, 0]])
            .collect()
    }

    #[test]
    fn repeat_once() {
        assert_eq!(played_values(RepeatMode::Once), [20.0, 21.0, 22.0, 23.0, 24.0]);
    }

    #[test]
    fn repeat_loop() {
        assert_eq!(
            played_values(RepeatMode::Loop),
            [20.0, 21.0, 22.0, 23.0, 24.0, 20.0, 21.0, 22.0, 23.0, 24.0, 20.0, 21.0]
        );
    }

    #[test]
    fn repeat_bounce() {
        assert_eq!(
            played_values(RepeatMode::Bounce),
            [20.0, 21.0, 22.0, 23.0, 24.0, 23.0, 22.0, 21.0, 20.0, 21.0, 22.0, 23.0]
        );
    }

    #[test]
    fn single_frame_bounce() {
        let mut cam =
            RecordedCamera::new(vec![Array2::zeros((2, 2))], RepeatMode::Bounce).unwrap();
        assert!(cam.acquire().is_ok());
        assert!(cam.acquire().is_ok());
    }

    #[test]
    fn repeat_mode_names() {
        assert_eq!("once".parse::<RepeatMode>().unwrap(), RepeatMode::Once);
        assert_eq!(RepeatMode::Bounce.to_string(), "bounce");
        assert!("sometimes".parse::<RepeatMode>().is_err());
    }

    #[test]
    fn empty_recording() {
        assert!(RecordedCamera::new(Vec::new(), RepeatMode::Loop).is_err());
    }

    #[test]
    fn mixed_dimensions() {
        let frames = vec![Array2::zeros((2, 2)), Array2::zeros((2, 3))];
        assert!(RecordedCamera::new(frames, RepeatMode::Loop).is_err());
    }

    const RECORDING: &str = r#"
        [[frames]]
        width = 3
        height = 2
        values = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0]

        [[frames]]
        width = 3
        height = 2
        values = [10, 11, 12, 13, 14, 15]
    "#;

    #[test]
    fn parse_toml() {
        let mut cam = RecordedCamera::from_toml(RECORDING, RepeatMode::Once).unwrap();
        assert_eq!(cam.sensor_axis(), GridAxis::new(3, 2));
        assert_eq!(
            cam.acquire().unwrap(),
            array![[0.0f32, 1.0], [2.0, 3.0], [4.0, 5.0]]
        );
        assert_eq!(cam.acquire().unwrap()[[2, 1]], 15.0);
        assert!(cam.acquire().is_err());
    }

    #[test]
    fn short_values() {
        let source = "[[frames]]\nwidth = 2\nheight = 2\nvalues = [1.0, 2.0, 3.0]\n";
        let result = RecordedCamera::from_toml(source, RepeatMode::Loop);
        assert!(result.is_err());
        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("a 2x2 frame needs 4 values, found 3"), "{}", message);
    }

    #[test]
    fn open_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(RECORDING.as_bytes()).unwrap();
        let mut cam = RecordedCamera::open(file.path(), RepeatMode::Loop).unwrap();
        assert_eq!(cam.acquire().unwrap()[[0, 1]], 1.0);
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = RecordedCamera::open(dir.path().join("missing.toml"), RepeatMode::Loop);
        assert!(result.is_err());
    }
}
