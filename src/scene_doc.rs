use std::{
    io::BufReader,
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use anyhow::Context as _;

use crate::{
    error::{CambatchError, CambatchResult},
    host::{CameraHandle, HostVersion, SceneHost},
};

/// JSON snapshot of the host scene state this tool reads and mutates:
/// cameras in the host's native selection order plus the stored render
/// settings. This is the on-disk interchange format between the host
/// application and the batch driver.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct SceneDoc {
    pub version: HostVersion,
    /// Path of the scene file open in the host; per-camera output folders
    /// are rooted at its directory.
    pub scene_file: PathBuf,
    pub cameras: Vec<String>,
    pub frame_start: i64,
    pub frame_end: i64,
    pub overwrite: bool,
    #[serde(default)]
    pub persistent_data: bool,
    pub output_path: String,
    #[serde(default)]
    pub use_file_extension: bool,
}

impl SceneDoc {
    pub fn from_path(path: &Path) -> CambatchResult<Self> {
        let f = std::fs::File::open(path)
            .with_context(|| format!("open scene document '{}'", path.display()))?;
        let doc: SceneDoc = serde_json::from_reader(BufReader::new(f))
            .with_context(|| format!("parse scene document JSON '{}'", path.display()))?;
        doc.validate()?;
        Ok(doc)
    }

    pub fn validate(&self) -> CambatchResult<()> {
        if self.frame_start > self.frame_end {
            return Err(CambatchError::scene(format!(
                "frame range {}..{} is inverted",
                self.frame_start, self.frame_end
            )));
        }
        if self.scene_file.as_os_str().is_empty() {
            return Err(CambatchError::scene("scene_file must be non-empty"));
        }
        if self.cameras.iter().any(String::is_empty) {
            return Err(CambatchError::scene("camera names must be non-empty"));
        }
        if self.output_path.is_empty() {
            return Err(CambatchError::scene("output_path must be non-empty"));
        }
        Ok(())
    }
}

/// [`SceneHost`] over a [`SceneDoc`].
///
/// Setters mutate the in-memory document, exactly like scene-level writes in
/// the host application. `render_animation` either invokes an external
/// renderer executable with the current document state, or logs the resolved
/// job as a dry run when no renderer is configured.
pub struct DocumentHost {
    doc: SceneDoc,
    renderer: Option<PathBuf>,
    active_camera: Option<String>,
}

impl DocumentHost {
    pub fn new(doc: SceneDoc) -> Self {
        Self {
            doc,
            renderer: None,
            active_camera: None,
        }
    }

    /// Configure the renderer executable invoked by `render_animation`.
    pub fn with_renderer(mut self, exe: impl Into<PathBuf>) -> Self {
        self.renderer = Some(exe.into());
        self
    }

    pub fn doc(&self) -> &SceneDoc {
        &self.doc
    }

    /// Renderer invocation contract: the executable receives the scene path
    /// followed by the camera, frame range, output path, and the overwrite /
    /// persistent-data / file-extension switches reflecting current state.
    fn renderer_command(&self, exe: &Path, camera: &str) -> Command {
        let mut cmd = Command::new(exe);
        cmd.arg(&self.doc.scene_file)
            .args(["--camera", camera])
            .args(["--frame-start", &self.doc.frame_start.to_string()])
            .args(["--frame-end", &self.doc.frame_end.to_string()])
            .args(["--output", &self.doc.output_path]);
        cmd.arg(if self.doc.overwrite {
            "--overwrite"
        } else {
            "--skip-existing"
        });
        if self.doc.persistent_data {
            cmd.arg("--persistent-data");
        }
        if self.doc.use_file_extension {
            cmd.arg("--use-extension");
        }
        cmd.stdin(Stdio::null());
        cmd
    }
}

impl SceneHost for DocumentHost {
    fn version(&self) -> HostVersion {
        self.doc.version
    }

    fn scene_file_path(&self) -> &Path {
        &self.doc.scene_file
    }

    fn select_cameras(&mut self) -> Vec<CameraHandle> {
        self.doc
            .cameras
            .iter()
            .enumerate()
            .map(|(index, name)| CameraHandle::new(index as u64, name))
            .collect()
    }

    fn set_active_camera(&mut self, camera: &CameraHandle) {
        self.active_camera = Some(camera.name().to_string());
    }

    fn frame_start(&self) -> i64 {
        self.doc.frame_start
    }

    fn set_frame_start(&mut self, frame: i64) {
        self.doc.frame_start = frame;
    }

    fn frame_end(&self) -> i64 {
        self.doc.frame_end
    }

    fn set_frame_end(&mut self, frame: i64) {
        self.doc.frame_end = frame;
    }

    fn overwrite(&self) -> bool {
        self.doc.overwrite
    }

    fn set_overwrite(&mut self, overwrite: bool) {
        self.doc.overwrite = overwrite;
    }

    fn set_persistent_data(&mut self, enabled: bool) {
        self.doc.persistent_data = enabled;
    }

    fn output_path(&self) -> String {
        self.doc.output_path.clone()
    }

    fn set_output_path(&mut self, path: &Path) {
        self.doc.output_path = path.to_string_lossy().into_owned();
    }

    fn set_use_file_extension(&mut self, enabled: bool) {
        self.doc.use_file_extension = enabled;
    }

    fn render_animation(&mut self) -> CambatchResult<()> {
        let camera = self
            .active_camera
            .clone()
            .ok_or_else(|| CambatchError::host("render requested with no active camera"))?;

        let Some(exe) = self.renderer.clone() else {
            println!(
                "dry run: render frames {}..{} with camera {} -> {}",
                self.doc.frame_start, self.doc.frame_end, camera, self.doc.output_path
            );
            return Ok(());
        };

        let output = self
            .renderer_command(&exe, &camera)
            .output()
            .map_err(|e| {
                CambatchError::host(format!(
                    "failed to spawn renderer '{}' (is it installed and on PATH?): {e}",
                    exe.display()
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CambatchError::host(format!(
                "renderer exited with status {} for camera {}: {}",
                output.status,
                camera,
                stderr.trim()
            )));
        }

        Ok(())
    }
}
