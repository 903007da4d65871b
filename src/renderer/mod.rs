pub mod camera;
pub mod gpu;
pub mod lighting;

pub use camera::{Camera, Viewport};
pub use gpu::{GpuGeometry, GpuState};
