#![forbid(unsafe_code)]

pub mod driver;
pub mod error;
pub mod host;
pub mod options;
pub mod scene_doc;

pub use driver::run_batch;
pub use error::{CambatchError, CambatchResult};
pub use host::{CameraHandle, HostVersion, SceneHost};
pub use options::{Config, Resolution, help_text, resolve};
pub use scene_doc::{DocumentHost, SceneDoc};
