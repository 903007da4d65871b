use std::f64::consts::{FRAC_PI_2, TAU};
use std::fmt::Write;

use crate::math::fold::{BASE_DEPTH, FoldParams, profile_depth};

/// Arc-length spacing of the unrolled profile.
pub const PROFILE_STEP: f64 = 0.025;
const MAX_PROFILE_SAMPLES: usize = 200_000;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProfileSample {
    /// Distance along the unrolled circumference.
    pub arc: f64,
    pub outer_depth: f64,
    pub inner_depth: f64,
}

/// Unrolled cut line of the tube end, laid out the way the pattern server
/// draws it: R and r are read as diameters, phi in whole degrees.
#[derive(Clone, Debug)]
pub struct FlatPattern {
    /// Distance from the tube centre to the straight edge of the pattern.
    pub edge_distance: f64,
    pub samples: Vec<ProfileSample>,
    /// `(arc, depth)` at each quarter turn.
    pub quarter_marks: [(f64, f64); 4],
}

impl FlatPattern {
    pub fn compute(params: &FoldParams) -> Self {
        let bend = params.bend_radius / 2.0;
        let tube = params.tube_radius / 2.0;
        let inner_tube = tube - params.thickness;
        let phi_deg = params.phi_deg.trunc();
        let edge_distance = (bend + BASE_DEPTH).trunc();

        let circumference = tube * TAU;
        let mut samples = Vec::new();
        let mut i = 0usize;
        loop {
            let arc = i as f64 * PROFILE_STEP;
            if !(arc < circumference) || samples.len() >= MAX_PROFILE_SAMPLES {
                break;
            }

            let theta = arc / tube;
            samples.push(ProfileSample {
                arc,
                outer_depth: profile_depth(edge_distance, tube, bend, phi_deg, theta),
                inner_depth: profile_depth(edge_distance, inner_tube, bend, phi_deg, theta),
            });
            i += 1;
        }

        let quarter_marks = std::array::from_fn(|k| {
            let theta = FRAC_PI_2 * (k + 1) as f64;
            (
                theta * tube,
                profile_depth(edge_distance, tube, bend, phi_deg, theta),
            )
        });

        Self {
            edge_distance,
            samples,
            quarter_marks,
        }
    }

    /// One `arc depth` line per sample, outer wall only.
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(self.samples.len() * 20);
        for s in &self.samples {
            let _ = writeln!(out, "{:.6} {:.6}", s.arc, s.outer_depth);
        }
        out
    }

    /// Bounding box of the finite profile points as `(depth_min, depth_max, arc_max)`.
    pub fn extent(&self) -> Option<(f64, f64, f64)> {
        let mut depth_min = f64::MAX;
        let mut depth_max = f64::MIN;
        let mut arc_max = 0.0f64;
        let mut any = false;

        for s in &self.samples {
            for d in [s.outer_depth, s.inner_depth] {
                if d.is_finite() {
                    depth_min = depth_min.min(d);
                    depth_max = depth_max.max(d);
                    any = true;
                }
            }
            arc_max = arc_max.max(s.arc);
        }

        any.then_some((depth_min.min(0.0), depth_max, arc_max))
    }
}
