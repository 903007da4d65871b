pub mod handler;
pub mod state;

pub use handler::{PatternRequester, on_parameters_changed};
pub use state::{GeometryBackend, SceneState};
