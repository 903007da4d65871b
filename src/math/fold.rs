use glam::DVec3;
use std::f64::consts::TAU;

/// Axial depth of the viewing volume. The surface never reaches past it.
pub const BASE_DEPTH: f64 = 4.0;

/// The four scalars that shape the folded tube.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FoldParams {
    /// R: radius of the bend the tube is fitted against.
    pub bend_radius: f64,
    /// r: outer radius of the tube.
    pub tube_radius: f64,
    /// phi: fold angle in degrees, 90 means no shear.
    pub phi_deg: f64,
    /// t: wall thickness.
    pub thickness: f64,
}

impl FoldParams {
    pub fn inner_wall(&self, u: f64, v: f64) -> DVec3 {
        evaluate(
            u,
            v,
            self.tube_radius - self.thickness,
            self.bend_radius,
            self.phi_deg,
        )
    }

    pub fn outer_wall(&self, u: f64, v: f64) -> DVec3 {
        evaluate(u, v, self.tube_radius, self.bend_radius, self.phi_deg)
    }

    /// Closed shell over `[0, 1]²`: the first half of `u` runs the inner wall
    /// out to the rim, the second half runs the outer wall back to the axis.
    pub fn surface(&self, u: f64, v: f64) -> DVec3 {
        if u < 0.5 {
            self.inner_wall(2.0 * u, v)
        } else {
            self.outer_wall(2.0 * (1.0 - u), v)
        }
    }
}

/// Depth of the cut at angle `theta` around a tube of radius `tube_radius`,
/// measured from `base`. Not clamped.
pub fn profile_depth(
    base: f64,
    tube_radius: f64,
    bend_radius: f64,
    phi_deg: f64,
    theta: f64,
) -> f64 {
    let x_disp = tube_radius * theta.sin();
    let mut d = base;

    if x_disp.abs() < bend_radius {
        d -= (bend_radius * bend_radius - x_disp * x_disp).sqrt();
    }

    // exact comparison: at 90 degrees the shear term must never be computed
    if phi_deg != 90.0 {
        let phi = phi_deg.to_radians();
        d += (tube_radius - tube_radius * theta.cos()) / phi.tan();
    }

    d
}

pub fn evaluate(u: f64, v: f64, tube_radius: f64, bend_radius: f64, phi_deg: f64) -> DVec3 {
    let theta = v * TAU;

    let mut d = profile_depth(BASE_DEPTH, tube_radius, bend_radius, phi_deg, theta);
    // `f64::min` would swallow NaN, the comparison keeps it
    if d > BASE_DEPTH {
        d = BASE_DEPTH;
    }

    DVec3::new(
        tube_radius * theta.sin(),
        tube_radius * theta.cos(),
        u * d,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    fn params(bend_radius: f64, tube_radius: f64, phi_deg: f64, thickness: f64) -> FoldParams {
        FoldParams {
            bend_radius,
            tube_radius,
            phi_deg,
            thickness,
        }
    }

    fn grid() -> impl Iterator<Item = (f64, f64)> {
        (0..=20).flat_map(|i| (0..=20).map(move |j| (i as f64 / 20.0, j as f64 / 20.0)))
    }

    #[test]
    fn depth_never_exceeds_base() {
        for &(bend, tube, phi) in &[(4.0, 2.0, 45.0), (1.0, 3.0, 120.0), (2.5, 2.0, 30.0)] {
            for (u, v) in grid() {
                let p = evaluate(u, v, tube, bend, phi);
                assert!(p.is_finite(), "non-finite point at u={u} v={v}");
                assert!(p.z <= BASE_DEPTH * u + 1e-12, "z={} above 4u at u={u}", p.z);
            }
        }
    }

    #[test]
    fn right_angle_has_no_shear() {
        let (tube, bend) = (2.0, 3.0);
        for (u, v) in grid() {
            let theta = v * TAU;
            let x_disp = tube * theta.sin();
            let expected = BASE_DEPTH - (bend * bend - x_disp * x_disp).sqrt();

            let p = evaluate(u, v, tube, bend, 90.0);
            assert_relative_eq!(p.z, u * expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn shear_applies_off_right_angle() {
        // theta = pi, cos = -1, so the shear adds 2r / tan(phi)
        let straight = evaluate(1.0, 0.5, 1.0, 0.5, 90.0);
        let sheared = evaluate(1.0, 0.5, 1.0, 0.5, 135.0);
        assert_relative_eq!(sheared.z - straight.z, 2.0 / 135f64.to_radians().tan(), epsilon = 1e-9);
    }

    #[test]
    fn wide_displacement_skips_bend() {
        let tube = 10.0;
        let bend = 1.0;
        let v = FRAC_PI_2 / TAU;

        let p = evaluate(1.0, v, tube, bend, 90.0);
        assert_relative_eq!(p.z, BASE_DEPTH, epsilon = 1e-12);

        // positive shear is clamped back to the base depth
        let p = evaluate(1.0, v, tube, bend, 30.0);
        assert_relative_eq!(p.z, BASE_DEPTH, epsilon = 1e-12);

        // negative shear is not clamped from below
        let p = evaluate(1.0, v, tube, bend, 150.0);
        let expected = BASE_DEPTH + tube / 150f64.to_radians().tan();
        assert_relative_eq!(p.z, expected, epsilon = 1e-9);
    }

    #[test]
    fn walls_meet_at_the_rim() {
        let closed = params(3.0, 2.0, 60.0, 0.0);
        for j in 0..=16 {
            let v = j as f64 / 16.0;
            let seam = closed.surface(0.5, v);
            assert!(seam.distance(closed.outer_wall(1.0, v)) < 1e-12);
            assert!(seam.distance(closed.inner_wall(1.0, v)) < 1e-12);
        }
    }

    #[test]
    fn wall_ends_pinch_to_zero_depth() {
        let p = params(3.0, 2.0, 60.0, 0.3);
        for j in 0..=16 {
            let v = j as f64 / 16.0;
            assert_eq!(p.surface(0.0, v).z, 0.0);
            assert_eq!(p.surface(1.0, v).z, 0.0);
        }
    }

    #[test]
    fn inner_wall_uses_reduced_radius() {
        let p = params(3.0, 2.0, 90.0, 0.5);
        let inner = p.surface(0.25, 0.25);
        let outer = p.surface(0.75, 0.25);
        assert_relative_eq!(inner.x, 1.5, epsilon = 1e-12);
        assert_relative_eq!(outer.x, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn nan_input_propagates() {
        let p = evaluate(0.5, 0.3, f64::NAN, 3.0, 60.0);
        assert!(p.z.is_nan());

        // an unreadable bend radius only drops the bend term
        let p = evaluate(0.5, 0.3, 2.0, f64::NAN, 90.0);
        assert_relative_eq!(p.z, 0.5 * BASE_DEPTH, epsilon = 1e-12);

        let p = evaluate(0.5, 0.3, 2.0, 3.0, f64::NAN);
        assert!(p.z.is_nan());
    }
}
