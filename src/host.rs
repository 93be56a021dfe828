use std::path::Path;

use crate::error::CambatchResult;

/// Version triple reported by the host application.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct HostVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl HostVersion {
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Persistent render data was introduced in host version 2.93.
    pub fn supports_persistent_data(&self) -> bool {
        self.major >= 2 && self.minor >= 93
    }
}

impl std::fmt::Display for HostVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Opaque, non-owning reference to a camera object in the host scene.
///
/// The id is only meaningful to the host that minted the handle; callers use
/// handles for identity and for the camera's display name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CameraHandle {
    id: u64,
    name: String,
}

impl CameraHandle {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Narrow capability surface over the host application's scene and render
/// settings. The render driver only talks to the host through this trait, so
/// a fake implementation is enough to exercise the whole batch loop.
///
/// All setters write through to the host's scene-level state: nothing is
/// rolled back between cameras, and a later camera observes whatever an
/// earlier iteration left behind.
pub trait SceneHost {
    fn version(&self) -> HostVersion;

    /// Path of the scene file currently open in the host.
    fn scene_file_path(&self) -> &Path;

    /// Select every camera object in the scene and return handles in the
    /// host's native selection order. Replaces the host's current object
    /// selection; that side effect is part of the contract.
    fn select_cameras(&mut self) -> Vec<CameraHandle>;

    fn set_active_camera(&mut self, camera: &CameraHandle);

    fn frame_start(&self) -> i64;
    fn set_frame_start(&mut self, frame: i64);
    fn frame_end(&self) -> i64;
    fn set_frame_end(&mut self, frame: i64);

    /// Whether the render engine re-renders frames that already exist.
    fn overwrite(&self) -> bool;
    fn set_overwrite(&mut self, overwrite: bool);

    fn set_persistent_data(&mut self, enabled: bool);

    /// The render-settings output filepath stored in the scene.
    fn output_path(&self) -> String;
    fn set_output_path(&mut self, path: &Path);

    fn set_use_file_extension(&mut self, enabled: bool);

    /// Render the full animation with the current scene state. Blocking; an
    /// error here is fatal to the batch.
    fn render_animation(&mut self) -> CambatchResult<()>;
}
