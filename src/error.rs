use thiserror::Error;

#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("failed to start the event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to open the preview window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("failed to create the rendering surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no graphics adapter can present to this window")]
    NoAdapter,

    #[error("failed to acquire a graphics device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("the rendering surface reports no usable texture format")]
    NoSurfaceFormat,

    #[error("invalid pattern server url `{url}`: {reason}")]
    InvalidServerUrl { url: String, reason: String },

    #[error("pattern request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("pattern server answered {status} for {url}")]
    HttpStatus { status: u16, url: String },

    #[error("pattern image could not be decoded: {0}")]
    Decode(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, PreviewError>;
