use glam::{Mat4, Vec3};

/// Fixed orthographic camera looking down on the fold from the side.
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,

    /// Half width and half height of the view volume.
    pub half_extent: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(5.0, 0.0, 5.0),
            target: Vec3::new(0.0, 0.0, 2.0),
            // the tube axis reads upright on screen
            up: Vec3::Z,

            half_extent: 4.0,
            near: 0.1,
            far: 2000.0,
        }
    }
}

impl Camera {
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        let h = self.half_extent;
        Mat4::orthographic_rh(-h, h, -h, h, self.near, self.far)
    }

    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Unit vector from the scene towards the camera.
    pub fn view_direction(&self) -> Vec3 {
        (self.position - self.target).normalize()
    }
}

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub view_dir: [f32; 3],
    pub _padding: f32,
}

impl CameraUniform {
    pub fn from_camera(camera: &Camera) -> Self {
        Self {
            view_proj: camera.view_projection_matrix().to_cols_array_2d(),
            view_dir: camera.view_direction().to_array(),
            _padding: 0.0,
        }
    }
}

/// Square region of the render target the scene is drawn into, in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

impl Viewport {
    /// Largest square centred in `(x, y, width, height)`, clipped to the
    /// target. The frustum is square, so a square keeps it undistorted.
    pub fn fit_square(
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        target_width: u32,
        target_height: u32,
    ) -> Option<Self> {
        let x = x.max(0.0);
        let y = y.max(0.0);
        let width = width.min(target_width as f32 - x);
        let height = height.min(target_height as f32 - y);

        let size = width.min(height).floor();
        if !(size >= 1.0) {
            return None;
        }

        Some(Self {
            x: (x + (width - size) / 2.0).floor(),
            y: (y + (height - size) / 2.0).floor(),
            size,
        })
    }
}
