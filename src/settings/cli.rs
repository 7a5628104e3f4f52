// SPDX-License-Identifier: GPL-3.0-or-later
use structopt::StructOpt;

use std::path::PathBuf;

#[derive(Debug, StructOpt)]
#[structopt(about = "Run frames from a thermal camera through the color grid pipeline.")]
pub struct Args {
    /// Path to a configuration file.
    #[structopt(short, long, parse(from_os_str), default_value = "config.toml")]
    pub config_path: PathBuf,

    /// Number of capture cycles to run. A cycle that detects motion acquires a second frame.
    #[structopt(short, long, default_value = "1")]
    pub frames: usize,

    /// Write a numbered bitmap to this directory whenever the alarm or motion trigger goes off.
    #[structopt(short, long, parse(from_os_str))]
    pub snapshot_dir: Option<PathBuf>,

    /// Write the final bitmap to this path.
    #[structopt(short, long, parse(from_os_str))]
    pub output: Option<PathBuf>,

    /// Write the final bitmap, base64 encoded, to this path.
    #[structopt(short, long, parse(from_os_str))]
    pub base64_output: Option<PathBuf>,

    /// Write an enlarged PNG preview of the final cells to this path.
    #[structopt(short, long, parse(from_os_str))]
    pub preview: Option<PathBuf>,
}

#[cfg(test)]
mod test {
    use std::path::PathBuf;

    use structopt::StructOpt;

    use super::Args;

    #[test]
    fn defaults() {
        let args = Args::from_iter(&["shop-thermal"]);
        assert_eq!(args.config_path, PathBuf::from("config.toml"));
        assert_eq!(args.frames, 1);
        assert!(args.output.is_none());
        assert!(args.base64_output.is_none());
        assert!(args.preview.is_none());
        assert!(args.snapshot_dir.is_none());
    }

    #[test]
    fn all_outputs() {
        let args = Args::from_iter(&[
            "shop-thermal",
            "--config-path",
            "shop.toml",
            "--frames",
            "30",
            "--output",
            "frame.bmp",
            "--base64-output",
            "frame.b64",
            "--preview",
            "frame.png",
            "--snapshot-dir",
            "snapshots",
        ]);
        assert_eq!(args.config_path, PathBuf::from("shop.toml"));
        assert_eq!(args.frames, 30);
        assert_eq!(args.output, Some(PathBuf::from("frame.bmp")));
        assert_eq!(args.base64_output, Some(PathBuf::from("frame.b64")));
        assert_eq!(args.preview, Some(PathBuf::from("frame.png")));
        assert_eq!(args.snapshot_dir, Some(PathBuf::from("snapshots")));
    }
}
