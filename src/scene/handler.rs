use log::debug;

use crate::math::FoldParams;
use crate::math::mesh::{SURFACE_SLICES, SURFACE_STACKS, tessellate};
use crate::params::ParameterInputs;
use crate::scene::state::{GeometryBackend, SceneState};

/// Receiver of the pattern image side channel.
pub trait PatternRequester {
    fn request_pattern(&mut self, inputs: &ParameterInputs);
}

pub fn rebuild_geometry<B>(scene: &mut SceneState<B::Geometry>, backend: &mut B, params: &FoldParams)
where
    B: GeometryBackend,
{
    let mesh = tessellate(|u, v| params.surface(u, v), SURFACE_SLICES, SURFACE_STACKS);
    debug!(
        "rebuilt fold R={} r={} phi={} t={}: {} vertices, {} triangles",
        params.bend_radius,
        params.tube_radius,
        params.phi_deg,
        params.thickness,
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    scene.replace_geometry(backend, &mesh);
}

/// Reaction to a press of *Preview*: one pattern request, one geometry rebuild.
pub fn on_parameters_changed<B, P>(
    scene: &mut SceneState<B::Geometry>,
    backend: &mut B,
    requester: &mut P,
    inputs: &ParameterInputs,
) -> FoldParams
where
    B: GeometryBackend,
    P: PatternRequester + ?Sized,
{
    requester.request_pattern(inputs);

    let params = inputs.parse();
    rebuild_geometry(scene, backend, &params);
    params
}
