// SPDX-License-Identifier: GPL-3.0-or-later
//! One session of the frame pipeline: normalize, interpolate, render and export.
use std::fmt;

use anyhow::Context as _;
use bytes::Bytes;
use image::RgbImage;
use ndarray::ArrayView2;
use tracing::{debug, info, instrument, trace};

use crate::bitmap::BitmapEncoder;
use crate::camera::ThermalCamera;
use crate::error::PipelineError;
use crate::frame::{FrameNormalizer, Statistics, Upscaler};
use crate::grid::GridAxis;
use crate::render::{preview, Color, DisplayMode, GridRenderer, Palette, RenderSettings};
use crate::settings::Settings;
use crate::trigger::{TriggerMonitor, Triggers};

/// The outcome of processing one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameReport {
    /// Statistics of the clipped frame, in degrees Celsius.
    pub statistics: Statistics,
    pub triggers: Triggers,
    /// How many cells changed color.
    pub changed: usize,
}

/// Owns every stage of the pipeline along with its buffers.
///
/// Nothing is shared between sessions; each one is configured once from [`Settings`].
#[derive(Debug)]
pub struct FramePipeline {
    normalizer: FrameNormalizer,
    upscaler: Option<Upscaler>,
    renderer: GridRenderer,
    encoder: BitmapEncoder,
    monitor: TriggerMonitor,
    render_settings: RenderSettings,
    frame_count: u64,
}

impl FramePipeline {
    /// Build every stage, then show the start-up spectrum until the first frame arrives.
    pub fn new(settings: &Settings) -> Result<Self, PipelineError> {
        let common = settings.camera.common();
        let sensor_axis = settings.camera.sensor_axis();
        let grid_axis = settings.camera.grid_axis();
        let normalizer = FrameNormalizer::new(
            sensor_axis,
            settings.camera.temperature_range()?,
            common.autofocus,
            common.orientation,
        )?;
        let upscaler = if common.interpolate {
            Some(Upscaler::new(sensor_axis))
        } else {
            None
        };
        let render_settings = settings.render;
        let palette = Palette::new(render_settings.palette, render_settings.palette_size)?;
        let mut renderer = GridRenderer::new(grid_axis, palette)?;
        renderer.update_image(grid_axis.spectrum().view(), false)?;
        debug!(?sensor_axis, ?grid_axis, mode = ?render_settings.mode, "pipeline ready");
        Ok(Self {
            normalizer,
            upscaler,
            renderer,
            encoder: BitmapEncoder::new(grid_axis),
            monitor: TriggerMonitor::new(&settings.trigger),
            render_settings,
            frame_count: 0,
        })
    }

    pub fn sensor_axis(&self) -> GridAxis {
        self.normalizer.axis()
    }

    pub fn grid_axis(&self) -> GridAxis {
        self.renderer.axis()
    }

    pub fn render_settings(&self) -> &RenderSettings {
        &self.render_settings
    }

    /// The current cell colors, addressed `[row][col]`.
    pub fn cells(&self) -> ArrayView2<'_, Color> {
        self.renderer.cells()
    }

    pub fn mutation_count(&self) -> u64 {
        self.renderer.mutation_count()
    }

    /// Run one frame of Celsius samples through the pipeline.
    #[instrument(level = "debug", skip(self, samples), fields(frame = self.frame_count))]
    pub fn process(&mut self, samples: ArrayView2<'_, f32>) -> Result<FrameReport, PipelineError> {
        let statistics = self.normalizer.normalize(samples)?;
        trace!(%statistics, "normalized frame");
        let normalized = match &mut self.upscaler {
            Some(upscaler) => upscaler.upscale(self.normalizer.normalized())?,
            None => self.normalizer.normalized(),
        };
        let changed = match self.render_settings.mode {
            DisplayMode::Image => self
                .renderer
                .update_image(normalized, self.render_settings.selfie)?,
            DisplayMode::Histogram => self.renderer.update_histogram(normalized)?,
        };
        let triggers = self.monitor.check(&statistics);
        if triggers.alarm || triggers.motion {
            let shown = statistics.display_in(&self.render_settings.units);
            if triggers.alarm {
                info!(%shown, "alarm");
            }
            if triggers.motion {
                info!(%shown, "motion detected");
            }
        }
        self.frame_count += 1;
        Ok(FrameReport {
            statistics,
            triggers,
            changed,
        })
    }

    /// Whether exported bitmaps are mirrored, which is only the case for selfie images.
    pub fn mirror_exports(&self) -> bool {
        self.render_settings.selfie && self.render_settings.mode == DisplayMode::Image
    }

    /// Encode the current cells as a 24-bit BMP.
    pub fn export_bitmap(&self) -> Result<Bytes, PipelineError> {
        let bitmap = self.encoder.encode(self.renderer.cells(), self.mirror_exports())?;
        info!(size = bitmap.len(), "exported bitmap");
        Ok(bitmap)
    }

    /// The current cells as a base64 encoded BMP, ready for uploading.
    pub fn export_base64(&self) -> Result<String, PipelineError> {
        self.encoder.encode_base64(self.renderer.cells(), self.mirror_exports())
    }

    /// An enlarged image of the current cells, as the display shows them.
    pub fn preview(&self) -> Result<RgbImage, PipelineError> {
        preview::enlarge(self.renderer.cells(), self.render_settings.cell_size)
    }
}

/// The trigger a snapshot was taken for.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SnapshotCause {
    Alarm,
    Motion,
}

impl fmt::Display for SnapshotCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Alarm => "alarm",
            Self::Motion => "motion",
        };
        write!(f, "{}", s)
    }
}

/// A bitmap exported because a trigger went off.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub cause: SnapshotCause,
    pub bitmap: Bytes,
}

impl Snapshot {
    /// A file name unique to this snapshot within a run, given the cycle it was taken in.
    pub fn file_name(&self, cycle: usize) -> String {
        format!("snapshot-{:04}-{}.bmp", cycle, self.cause)
    }
}

/// The outcome of one [`Session::cycle`].
#[derive(Clone, Debug, PartialEq)]
pub struct Cycle {
    /// The report for the frame the triggers were checked against.
    pub report: FrameReport,
    pub snapshots: Vec<Snapshot>,
}

/// A [`FramePipeline`] fed by a camera.
pub struct Session {
    camera: Box<dyn ThermalCamera + Send>,
    pipeline: FramePipeline,
}

impl Session {
    pub fn new(settings: &Settings) -> anyhow::Result<Self> {
        let pipeline = FramePipeline::new(settings).context("Invalid pipeline configuration")?;
        let camera = settings
            .camera
            .create_camera()
            .context("Error configuring camera")?;
        Ok(Self::with_camera(camera, pipeline)?)
    }

    /// Pair an already created camera with a pipeline.
    pub fn with_camera(
        camera: Box<dyn ThermalCamera + Send>,
        pipeline: FramePipeline,
    ) -> Result<Self, PipelineError> {
        let camera_axis = camera.sensor_axis();
        if camera_axis != pipeline.sensor_axis() {
            return Err(PipelineError::InvalidConfig(format!(
                "camera frames are {}x{}, the pipeline expects {}x{}",
                camera_axis.width,
                camera_axis.height,
                pipeline.sensor_axis().width,
                pipeline.sensor_axis().height
            )));
        }
        Ok(Self { camera, pipeline })
    }

    pub fn pipeline(&self) -> &FramePipeline {
        &self.pipeline
    }

    /// Acquire one frame from the camera and process it.
    pub fn step(&mut self) -> anyhow::Result<FrameReport> {
        let samples = self
            .camera
            .acquire()
            .context("Unable to acquire a frame")?;
        Ok(self.pipeline.process(samples.view())?)
    }

    /// Run one pass of the capture loop.
    ///
    /// A frame is acquired and processed, then a snapshot is exported for each trigger it set off.
    /// The alarm snapshot shows the frame that set it off. Motion acquires another frame before
    /// its snapshot is taken, and that frame becomes the baseline for the next motion check.
    pub fn cycle(&mut self) -> anyhow::Result<Cycle> {
        let report = self.step()?;
        let mut snapshots = Vec::new();
        if report.triggers.alarm {
            snapshots.push(self.snapshot(SnapshotCause::Alarm)?);
        }
        if report.triggers.motion {
            let followup = self.step().context("Unable to re-acquire after motion")?;
            debug!(changed = followup.changed, "re-acquired after motion");
            snapshots.push(self.snapshot(SnapshotCause::Motion)?);
        }
        Ok(Cycle { report, snapshots })
    }

    fn snapshot(&self, cause: SnapshotCause) -> anyhow::Result<Snapshot> {
        let bitmap = self
            .pipeline
            .export_bitmap()
            .with_context(|| format!("Unable to export {} snapshot", cause))?;
        info!(%cause, "took snapshot");
        Ok(Snapshot { cause, bitmap })
    }
}
