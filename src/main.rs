// SPDX-License-Identifier: GPL-3.0-or-later
use std::fs;

use anyhow::Context as _;
use structopt::StructOpt;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use shop_thermal::settings::Args;
use shop_thermal::{Cycle, Session, Settings};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let args = Args::from_args();
    let settings = Settings::from_path(&args.config_path)?;
    debug!(?settings, "loaded configuration");
    let units = settings.render.units;
    let mut session = Session::new(&settings)?;
    if args.frames == 0 {
        warn!("no frames requested, exporting the start-up spectrum");
    }
    if let Some(dir) = &args.snapshot_dir {
        fs::create_dir_all(dir)
            .with_context(|| format!("Unable to create snapshot directory {}", dir.display()))?;
    }
    for cycle in 0..args.frames {
        let Cycle { report, snapshots } = session
            .cycle()
            .with_context(|| format!("Error processing frame {}", cycle))?;
        info!(
            cycle,
            statistics = %report.statistics.display_in(&units),
            changed = report.changed,
            alarm = report.triggers.alarm,
            motion = report.triggers.motion,
            "processed frame"
        );
        match &args.snapshot_dir {
            Some(dir) => {
                for snapshot in snapshots {
                    let path = dir.join(snapshot.file_name(cycle));
                    fs::write(&path, &snapshot.bitmap).with_context(|| {
                        format!("Unable to write snapshot to {}", path.display())
                    })?;
                    info!(path = %path.display(), "wrote snapshot");
                }
            }
            None if !snapshots.is_empty() => {
                debug!(count = snapshots.len(), "no snapshot directory, discarding snapshots");
            }
            None => (),
        }
    }
    let pipeline = session.pipeline();
    if let Some(path) = &args.output {
        let bitmap = pipeline.export_bitmap()?;
        fs::write(path, &bitmap)
            .with_context(|| format!("Unable to write bitmap to {}", path.display()))?;
        info!(path = %path.display(), "wrote bitmap");
    }
    if let Some(path) = &args.base64_output {
        let encoded = pipeline.export_base64()?;
        fs::write(path, encoded)
            .with_context(|| format!("Unable to write base64 bitmap to {}", path.display()))?;
        info!(path = %path.display(), "wrote base64 bitmap");
    }
    if let Some(path) = &args.preview {
        pipeline
            .preview()?
            .save_with_format(path, image::ImageFormat::Png)
            .with_context(|| format!("Unable to write preview to {}", path.display()))?;
        info!(path = %path.display(), "wrote preview");
    }
    Ok(())
}
