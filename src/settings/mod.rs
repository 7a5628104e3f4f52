// SPDX-License-Identifier: GPL-3.0-or-later
use std::path::Path;

use anyhow::Context as _;
use serde::Deserialize;

mod cli;
pub(crate) mod gradient;

use crate::camera::CameraSettings;
use crate::render::RenderSettings;
use crate::trigger::TriggerSettings;
pub use cli::Args;

/// Everything a session is configured with. It does not change for the life of the session.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Settings {
    /// Camera-specific settings.
    #[serde(default)]
    pub camera: CameraSettings,

    /// Settings related to how the frames are colored and exported.
    #[serde(default)]
    pub render: RenderSettings,

    /// Alarm and motion trigger settings.
    #[serde(default)]
    pub trigger: TriggerSettings,
}

impl Settings {
    pub fn from_toml(source: &str) -> anyhow::Result<Self> {
        toml::from_str(source).context("Unable to parse configuration")
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Unable to read configuration file {}", path.display()))?;
        Self::from_toml(&source)
    }
}
