use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use tracing::info;

use crate::{
    error::{CambatchError, CambatchResult},
    host::{CameraHandle, SceneHost},
    options::Config,
};

/// Run the batch: enumerate cameras, map every selected index to a handle,
/// then render each camera in turn.
///
/// Every index is resolved before the first render, so an out-of-range index
/// fails the whole batch without touching the render engine. Scene-level
/// writes (frame range, overwrite flag, persistent data) are not rolled back
/// between cameras; a later iteration inherits them, and only the active
/// camera and output path are set fresh each time.
pub fn run_batch(host: &mut dyn SceneHost, config: &Config) -> CambatchResult<()> {
    let cameras = host.select_cameras();
    info!(
        cameras = %names(&cameras),
        "enumerated {} scene cameras",
        cameras.len()
    );

    let selected = pick_cameras(&cameras, &config.cameras)?;
    info!("rendering with cameras: {}", names(&selected));

    for camera in &selected {
        render_with_camera(host, camera, config)?;
    }

    Ok(())
}

/// Map selected 0-based indices to camera handles, in index order.
fn pick_cameras(
    cameras: &[CameraHandle],
    indices: &BTreeSet<usize>,
) -> CambatchResult<Vec<CameraHandle>> {
    indices
        .iter()
        .map(|&index| {
            cameras.get(index).cloned().ok_or_else(|| {
                CambatchError::host(format!(
                    "camera index {} is out of range: the scene has {} cameras",
                    index + 1,
                    cameras.len()
                ))
            })
        })
        .collect()
}

#[tracing::instrument(skip(host, config), fields(camera = camera.name()))]
fn render_with_camera(
    host: &mut dyn SceneHost,
    camera: &CameraHandle,
    config: &Config,
) -> CambatchResult<()> {
    info!("rendering with camera {}", camera.name());

    host.set_active_camera(camera);

    if !config.use_all_frames {
        if let Some(start) = config.frame_start {
            host.set_frame_start(start);
        }
        if let Some(end) = config.frame_end {
            host.set_frame_end(end);
        }
    }

    // Write the overwrite flag only when the user picked a policy; otherwise
    // the value stored in the scene file stays in effect.
    if let Some(overwrite) = config.overwrite {
        host.set_overwrite(overwrite);
    }

    // Already version-gated by the resolver.
    if config.persistent_data {
        host.set_persistent_data(true);
    }

    let stored = host.output_path();
    let out = derive_output_path(host.scene_file_path(), camera.name(), &stored);

    host.set_use_file_extension(true);
    host.set_output_path(&out);

    host.render_animation()
}

/// Build the per-camera output path: `<scene_dir>/<base>_<camera>/<file>`,
/// where `base` is the scene file name up to its first `.` and `file` is the
/// trailing segment of the output path stored in the scene.
fn derive_output_path(scene_path: &Path, camera_name: &str, stored: &str) -> PathBuf {
    let file_name = scene_path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("");
    let base = file_name.split('.').next().unwrap_or("");
    let render_file = stored.rsplit(['/', '\\']).next().unwrap_or("");
    let scene_dir = scene_path.parent().unwrap_or_else(|| Path::new("."));
    scene_dir
        .join(format!("{base}_{camera_name}"))
        .join(render_file)
}

fn names(cameras: &[CameraHandle]) -> String {
    cameras
        .iter()
        .map(CameraHandle::name)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_subfolder_joins_scene_base_and_camera_name() {
        let out = derive_output_path(Path::new("/work/Scene.blend"), "Cam.001", "//frame_");
        assert_eq!(out, Path::new("/work/Scene_Cam.001/frame_"));
    }

    #[test]
    fn scene_base_name_stops_at_first_dot() {
        let out = derive_output_path(Path::new("/work/Scene.v2.blend"), "Main", "out");
        assert_eq!(out, Path::new("/work/Scene_Main/out"));
    }

    #[test]
    fn stored_path_trailing_segment_survives_both_separators() {
        let out = derive_output_path(Path::new("/w/S.blend"), "A", r"C:\renders\frame_");
        assert_eq!(out, Path::new("/w/S_A/frame_"));
        let out = derive_output_path(Path::new("/w/S.blend"), "A", "renders/frame_");
        assert_eq!(out, Path::new("/w/S_A/frame_"));
    }

    #[test]
    fn out_of_range_index_reports_one_based_position() {
        let cameras = vec![
            CameraHandle::new(0, "A"),
            CameraHandle::new(1, "B"),
        ];
        let err = pick_cameras(&cameras, &BTreeSet::from([2])).unwrap_err();
        assert!(err.to_string().contains("camera index 3 is out of range"));
    }

    #[test]
    fn indices_resolve_in_index_order() {
        let cameras = vec![
            CameraHandle::new(0, "A"),
            CameraHandle::new(1, "B"),
            CameraHandle::new(2, "C"),
        ];
        let picked = pick_cameras(&cameras, &BTreeSet::from([2, 0])).unwrap();
        let picked: Vec<_> = picked.iter().map(|c| c.name().to_string()).collect();
        assert_eq!(picked, vec!["A", "C"]);
    }
}
