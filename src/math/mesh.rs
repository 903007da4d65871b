use glam::DVec3;

pub const SURFACE_SLICES: usize = 50;
pub const SURFACE_STACKS: usize = 50;

pub struct TriangleMesh {
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
}

impl TriangleMesh {
    /// Placeholder geometry held by the mesh node before the first rebuild.
    pub fn empty() -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[cfg(test)]
    pub fn position(&self, index: usize) -> glam::Vec3 {
        glam::Vec3::from_slice(&self.vertices[index * 3..index * 3 + 3])
    }
}

/// Samples `func` on a `(slices + 1) x (stacks + 1)` grid over `[0, 1]²`,
/// `u` along a row and `v` down the rows, and stitches two triangles per cell.
pub fn tessellate<F>(func: F, slices: usize, stacks: usize) -> TriangleMesh
where
    F: Fn(f64, f64) -> DVec3,
{
    let row_len = slices + 1;
    let mut vertices = Vec::with_capacity(row_len * (stacks + 1) * 3);

    for i in 0..=stacks {
        let v = i as f64 / stacks as f64;
        for j in 0..=slices {
            let u = j as f64 / slices as f64;
            let p = func(u, v);

            vertices.push(p.x as f32);
            vertices.push(p.y as f32);
            vertices.push(p.z as f32);
        }
    }

    let mut indices = Vec::with_capacity(slices * stacks * 6);
    for i in 0..stacks {
        for j in 0..slices {
            let a = (i * row_len + j) as u32;
            let b = (i * row_len + j + 1) as u32;
            let c = ((i + 1) * row_len + j + 1) as u32;
            let d = ((i + 1) * row_len + j) as u32;

            indices.push(a);
            indices.push(b);
            indices.push(d);

            indices.push(b);
            indices.push(c);
            indices.push(d);
        }
    }

    TriangleMesh { vertices, indices }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::fold::FoldParams;
    use glam::Vec3;

    #[test]
    fn grid_counts() {
        let mesh = tessellate(|u, v| DVec3::new(u, v, 0.0), SURFACE_SLICES, SURFACE_STACKS);
        assert_eq!(mesh.vertex_count(), 51 * 51);
        assert_eq!(mesh.triangle_count(), 50 * 50 * 2);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertex_count()));
    }

    #[test]
    fn u_runs_along_rows() {
        let mesh = tessellate(|u, v| DVec3::new(u, v, 0.0), 4, 2);
        assert_eq!(mesh.position(0), Vec3::ZERO);
        assert_eq!(mesh.position(4), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(mesh.position(5), Vec3::new(0.0, 0.5, 0.0));
        assert_eq!(mesh.position(14), Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn first_cell_winding() {
        let mesh = tessellate(|u, v| DVec3::new(u, v, 0.0), 2, 2);
        assert_eq!(&mesh.indices[..6], &[0, 1, 3, 1, 4, 3]);
    }

    #[test]
    fn fold_surface_seams_close() {
        let params = FoldParams {
            bend_radius: 3.0,
            tube_radius: 2.0,
            phi_deg: 75.0,
            thickness: 0.25,
        };
        let mesh = tessellate(|u, v| params.surface(u, v), SURFACE_SLICES, SURFACE_STACKS);
        let row_len = SURFACE_SLICES + 1;

        for i in 0..=SURFACE_STACKS {
            let first = mesh.position(i * row_len);
            let last = mesh.position(i * row_len + SURFACE_SLICES);
            assert_eq!(first.z, 0.0);
            assert_eq!(last.z, 0.0);
        }
    }

    #[test]
    fn empty_mesh_has_nothing_to_draw() {
        let mesh = TriangleMesh::empty();
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.triangle_count(), 0);
    }
}
