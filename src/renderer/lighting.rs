use glam::Vec3;

pub const LIGHT_COUNT: usize = 3;

#[derive(Clone, Copy, Debug)]
pub struct PointLight {
    pub position: Vec3,
    pub color: Vec3,
    pub intensity: f32,
}

impl PointLight {
    pub const fn white(position: Vec3) -> Self {
        Self {
            position,
            color: Vec3::ONE,
            intensity: 1.0,
        }
    }
}

/// Key light overhead, fill from the front corner, rim from below.
pub const SCENE_LIGHTS: [PointLight; LIGHT_COUNT] = [
    PointLight::white(Vec3::new(0.0, 200.0, 0.0)),
    PointLight::white(Vec3::new(100.0, 200.0, 100.0)),
    PointLight::white(Vec3::new(-100.0, -200.0, -100.0)),
];

#[derive(Clone, Copy, Debug)]
pub struct Material {
    /// sRGB hex, e.g. `0xA0A0A0`.
    pub color: u32,
    pub roughness: f32,
    pub metalness: f32,
}

pub const MATTE_METAL: Material = Material {
    color: 0xA0A0A0,
    roughness: 0.74,
    metalness: 1.0,
};

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

impl Material {
    pub fn linear_color(&self) -> Vec3 {
        let channel = |shift: u32| srgb_to_linear(((self.color >> shift) & 0xFF) as f32 / 255.0);
        Vec3::new(channel(16), channel(8), channel(0))
    }
}

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniform {
    pub position: [f32; 4],
    /// rgb color, intensity in `w`
    pub color: [f32; 4],
}

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightsUniform {
    pub lights: [LightUniform; LIGHT_COUNT],
}

impl LightsUniform {
    pub fn from_lights(lights: &[PointLight; LIGHT_COUNT]) -> Self {
        Self {
            lights: lights.map(|l| LightUniform {
                position: l.position.extend(1.0).to_array(),
                color: l.color.extend(l.intensity).to_array(),
            }),
        }
    }
}

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    pub base_color: [f32; 4],
    pub roughness: f32,
    pub metalness: f32,
    pub _pad: [f32; 2],
}

impl MaterialUniform {
    pub fn from_material(material: &Material) -> Self {
        Self {
            base_color: material.linear_color().extend(1.0).to_array(),
            roughness: material.roughness,
            metalness: material.metalness,
            _pad: [0.0; 2],
        }
    }
}

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshUniform {
    pub model: [[f32; 4]; 4],
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn gray_stays_gray_in_linear_space() {
        let c = MATTE_METAL.linear_color();
        assert_eq!(c.x, c.y);
        assert_eq!(c.y, c.z);
        // 0xA0 is ~0.627 in sRGB, ~0.352 linear
        assert_relative_eq!(c.x, 0.3515, epsilon = 1e-3);
    }

    #[test]
    fn uniform_layouts_are_16_byte_aligned() {
        assert_eq!(std::mem::size_of::<LightsUniform>() % 16, 0);
        assert_eq!(std::mem::size_of::<MaterialUniform>(), 32);
        assert_eq!(std::mem::size_of::<MeshUniform>(), 64);
    }

    #[test]
    fn lights_pack_intensity_in_w() {
        let u = LightsUniform::from_lights(&SCENE_LIGHTS);
        assert_eq!(u.lights[1].position, [100.0, 200.0, 100.0, 1.0]);
        assert_eq!(u.lights[2].color, [1.0, 1.0, 1.0, 1.0]);
    }
}
