use std::collections::BTreeSet;

use clap::{CommandFactory as _, Parser};

use crate::{
    error::{CambatchError, CambatchResult},
    host::HostVersion,
};

/// Batch options, as passed after the host's `--` argument separator.
#[derive(Parser, Debug)]
#[command(
    name = "cambatch",
    no_binary_name = true,
    disable_version_flag = true,
    about = "Render the scene's animation once per selected camera, routing \
             output into a per-camera subfolder"
)]
struct BatchArgs {
    /// Comma-separated list of 1-indexed integers for each camera view to be
    /// rendered.
    #[arg(short = 'c', long = "camera-list")]
    camera_list: Option<String>,

    /// First frame to render for each camera. If not set the value stored in
    /// the scene file is used.
    #[arg(short = 's', long = "frame-start")]
    frame_start: Option<i64>,

    /// Last frame to render for each camera. If not set the value stored in
    /// the scene file is used.
    #[arg(short = 'e', long = "frame-end")]
    frame_end: Option<i64>,

    /// Overwrite existing frames during rendering.
    #[arg(short = 'o', long = "overwrite", conflicts_with = "no_overwrite")]
    overwrite: bool,

    /// Skip existing frames during rendering.
    #[arg(short = 'n', long = "no-overwrite")]
    no_overwrite: bool,

    /// Keep render data between frames (host 2.93+ only; uses more memory).
    #[arg(short = 'p', long = "persistent-data")]
    persistent_data: bool,
}

/// Resolved batch configuration. Built once by [`resolve`] and passed by
/// reference into the render driver; never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Selected cameras as 0-based indices into the host's camera
    /// enumeration order. A set: duplicates collapse, order is not
    /// contractual.
    pub cameras: BTreeSet<usize>,
    pub frame_start: Option<i64>,
    pub frame_end: Option<i64>,
    /// True iff neither frame bound was supplied; the scene's stored range
    /// is then left untouched.
    pub use_all_frames: bool,
    /// `None` defers to the overwrite flag stored in the scene file.
    pub overwrite: Option<bool>,
    pub persistent_data: bool,
}

/// Outcome of option resolution. `Help` and `Usage` both terminate the batch
/// before any render; only `Usage` carries a user-error message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    Run(Config),
    Help,
    Usage(String),
}

/// Full help text for the batch options.
pub fn help_text() -> String {
    BatchArgs::command().render_long_help().to_string()
}

/// Resolve raw batch tokens into a [`Config`].
///
/// `version` is the host-reported version; a persistent-data request on a
/// host older than 2.93 is silently dropped here, before the driver ever
/// sees the config.
pub fn resolve(tokens: &[String], version: HostVersion) -> Resolution {
    if tokens.is_empty() {
        return Resolution::Help;
    }

    let args = match BatchArgs::try_parse_from(tokens) {
        Ok(args) => args,
        Err(err) => {
            use clap::error::ErrorKind;
            return match err.kind() {
                ErrorKind::DisplayHelp => Resolution::Help,
                _ => Resolution::Usage(err.render().to_string()),
            };
        }
    };

    let Some(camera_list) = args.camera_list.as_deref() else {
        return Resolution::Usage(
            "error: --camera-list=\"1,2,5\" argument not given, aborting".into(),
        );
    };

    let cameras = match parse_camera_list(camera_list) {
        Ok(cameras) => cameras,
        Err(err) => return Resolution::Usage(err.to_string()),
    };

    Resolution::Run(Config {
        cameras,
        frame_start: args.frame_start,
        frame_end: args.frame_end,
        use_all_frames: args.frame_start.is_none() && args.frame_end.is_none(),
        overwrite: match (args.overwrite, args.no_overwrite) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        },
        persistent_data: args.persistent_data && version.supports_persistent_data(),
    })
}

/// Parse a camera-list value into 0-based indices.
///
/// Input indices are 1-based; `0` and negative values clamp to index `0`
/// rather than being rejected. That clamping is long-standing documented
/// behavior, kept as-is.
fn parse_camera_list(value: &str) -> CambatchResult<BTreeSet<usize>> {
    let mut cameras = BTreeSet::new();
    for token in value.split(',') {
        let index: i64 = token.parse().map_err(|_| {
            CambatchError::usage(
                "error: --camera-list requires a comma-separated list of integers (no spaces)",
            )
        })?;
        cameras.insert(if index > 0 { (index - 1) as usize } else { 0 });
    }
    Ok(cameras)
}
