use glam::Mat4;
use std::f32::consts::TAU;

use crate::math::TriangleMesh;

/// Idle spin applied to the mesh on every frame, in radians.
pub const ROTATION_STEP: f32 = 0.005;

/// Owner of the GPU-side resources a mesh geometry lives in.
pub trait GeometryBackend {
    type Geometry;

    fn create_geometry(&mut self, mesh: &TriangleMesh) -> Self::Geometry;

    /// Releases the geometry's resources. They are not reclaimed otherwise.
    fn dispose_geometry(&mut self, geometry: Self::Geometry);
}

/// The single renderable in the scene.
pub struct MeshNode<G> {
    geometry: Option<G>,
    rotation_z: f32,
    vertex_count: usize,
    triangle_count: usize,
}

pub struct SceneState<G> {
    mesh: MeshNode<G>,
    frames: u64,
}

impl<G> SceneState<G> {
    /// Builds the scene around an empty placeholder geometry.
    pub fn new<B>(backend: &mut B) -> Self
    where
        B: GeometryBackend<Geometry = G>,
    {
        let placeholder = TriangleMesh::empty();
        Self {
            mesh: MeshNode {
                geometry: Some(backend.create_geometry(&placeholder)),
                rotation_z: 0.0,
                vertex_count: 0,
                triangle_count: 0,
            },
            frames: 0,
        }
    }

    /// Swaps in a new geometry. The old one is disposed before the new one is
    /// created, so at most one is alive at any time.
    pub fn replace_geometry<B>(&mut self, backend: &mut B, mesh: &TriangleMesh)
    where
        B: GeometryBackend<Geometry = G>,
    {
        if let Some(old) = self.mesh.geometry.take() {
            backend.dispose_geometry(old);
        }
        self.mesh.geometry = Some(backend.create_geometry(mesh));
        self.mesh.vertex_count = mesh.vertex_count();
        self.mesh.triangle_count = mesh.triangle_count();
    }

    pub fn advance_frame(&mut self) {
        self.mesh.rotation_z = (self.mesh.rotation_z + ROTATION_STEP).rem_euclid(TAU);
        self.frames += 1;
    }

    pub fn geometry(&self) -> Option<&G> {
        self.mesh.geometry.as_ref()
    }

    pub fn rotation(&self) -> f32 {
        self.mesh.rotation_z
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn vertex_count(&self) -> usize {
        self.mesh.vertex_count
    }

    pub fn triangle_count(&self) -> usize {
        self.mesh.triangle_count
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_z(self.mesh.rotation_z)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[derive(Debug, PartialEq, Eq)]
    pub(crate) enum Event {
        Create { id: usize, vertices: usize },
        Dispose { id: usize },
    }

    /// Hands out numbered geometries and records what happens to them.
    #[derive(Default)]
    pub(crate) struct RecordingBackend {
        pub(crate) events: Vec<Event>,
        pub(crate) live: usize,
        next_id: usize,
    }

    impl GeometryBackend for RecordingBackend {
        type Geometry = usize;

        fn create_geometry(&mut self, mesh: &TriangleMesh) -> usize {
            let id = self.next_id;
            self.next_id += 1;
            self.live += 1;
            self.events.push(Event::Create {
                id,
                vertices: mesh.vertex_count(),
            });
            id
        }

        fn dispose_geometry(&mut self, id: usize) {
            self.live -= 1;
            self.events.push(Event::Dispose { id });
        }
    }

    fn triangle() -> TriangleMesh {
        TriangleMesh {
            vertices: vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            indices: vec![0, 1, 2],
        }
    }

    #[test]
    fn starts_with_placeholder() {
        let mut backend = RecordingBackend::default();
        let scene = SceneState::new(&mut backend);

        assert_eq!(scene.geometry(), Some(&0));
        assert_eq!(backend.events, vec![Event::Create { id: 0, vertices: 0 }]);
        assert_eq!(scene.rotation(), 0.0);
    }

    #[test]
    fn replace_disposes_first() {
        let mut backend = RecordingBackend::default();
        let mut scene = SceneState::new(&mut backend);

        scene.replace_geometry(&mut backend, &triangle());
        scene.replace_geometry(&mut backend, &triangle());

        assert_eq!(
            backend.events,
            vec![
                Event::Create { id: 0, vertices: 0 },
                Event::Dispose { id: 0 },
                Event::Create { id: 1, vertices: 3 },
                Event::Dispose { id: 1 },
                Event::Create { id: 2, vertices: 3 },
            ]
        );
        assert_eq!(backend.live, 1);
        assert_eq!(scene.geometry(), Some(&2));
        assert_eq!(scene.triangle_count(), 1);
    }

    #[test]
    fn rotation_accumulates_per_frame() {
        let mut backend = RecordingBackend::default();
        let mut scene = SceneState::new(&mut backend);
        scene.replace_geometry(&mut backend, &triangle());
        let events_before = backend.events.len();

        for _ in 0..200 {
            scene.advance_frame();
        }

        assert_relative_eq!(scene.rotation(), 200.0 * ROTATION_STEP, epsilon = 1e-4);
        assert_eq!(scene.frames(), 200);
        assert_eq!(backend.events.len(), events_before);
        assert_eq!(scene.geometry(), Some(&1));
    }

    #[test]
    fn rotation_wraps_at_full_turn() {
        let mut backend = RecordingBackend::default();
        let mut scene = SceneState::new(&mut backend);

        let frames = 1500;
        for _ in 0..frames {
            scene.advance_frame();
        }

        let expected = (frames as f32 * ROTATION_STEP).rem_euclid(TAU);
        assert!(scene.rotation() < TAU);
        assert_relative_eq!(scene.rotation(), expected, epsilon = 1e-3);
    }

    #[test]
    fn model_matrix_spins_about_axis() {
        let mut backend = RecordingBackend::default();
        let mut scene = SceneState::new(&mut backend);
        for _ in 0..100 {
            scene.advance_frame();
        }

        let m = scene.model_matrix();
        let axis = m.transform_point3(glam::Vec3::new(0.0, 0.0, 3.0));
        assert_relative_eq!(axis.z, 3.0, epsilon = 1e-6);
        assert_relative_eq!(axis.x, 0.0, epsilon = 1e-6);

        let side = m.transform_point3(glam::Vec3::X);
        assert_relative_eq!(side.x, 0.5f32.cos(), epsilon = 1e-4);
        assert_relative_eq!(side.y, 0.5f32.sin(), epsilon = 1e-4);
    }
}
