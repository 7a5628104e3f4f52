// SPDX-License-Identifier: GPL-3.0-or-later
//! Frame pipeline for a low-resolution thermal camera.
//!
//! Raw Celsius frames are clipped and normalized ([`frame::FrameNormalizer`]), optionally
//! doubled in resolution ([`frame::Upscaler`]), colored into a grid of cells
//! ([`render::GridRenderer`]) and exported as 24-bit bitmaps ([`bitmap::BitmapEncoder`]).
//! [`pipeline::FramePipeline`] ties the stages together for one session.
pub mod bitmap;
pub mod camera;
pub mod error;
pub mod frame;
pub mod grid;
pub mod pipeline;
pub mod render;
pub mod settings;
pub mod temperature;
pub mod trigger;

pub use error::PipelineError;
pub use pipeline::{Cycle, FramePipeline, FrameReport, Session, Snapshot, SnapshotCause};
pub use settings::Settings;
