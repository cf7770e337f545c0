use glam::Vec3;

/// Linear RGB color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgb(pub Vec3);

impl Rgb {
    /// Build from a `0xRRGGBB` sRGB literal, converting to linear space.
    pub fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xff) as f32 / 255.0;
        let g = ((hex >> 8) & 0xff) as f32 / 255.0;
        let b = (hex & 0xff) as f32 / 255.0;
        Self(Vec3::new(
            srgb_to_linear(r),
            srgb_to_linear(g),
            srgb_to_linear(b),
        ))
    }

    pub fn to_array(self) -> [f32; 3] {
        self.0.to_array()
    }
}

#[inline]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Emissive {
    pub color: Rgb,
    pub intensity: f32,
}

/// Surface description for a mesh node.
///
/// `unlit` materials ignore scene lights and show their base color directly.
/// `metalness`/`roughness` are interpreted loosely by the shader; the device is
/// a visual approximation, not a physically based render.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub color: Rgb,
    pub metalness: f32,
    pub roughness: f32,
    pub clearcoat: f32,
    pub emissive: Option<Emissive>,
    pub unlit: bool,
    pub transparent: bool,
}

impl Material {
    pub fn physical(hex: u32, metalness: f32, roughness: f32) -> Self {
        Self {
            color: Rgb::from_hex(hex),
            metalness,
            roughness,
            clearcoat: 0.0,
            emissive: None,
            unlit: false,
            transparent: false,
        }
    }

    pub fn basic(hex: u32) -> Self {
        Self {
            unlit: true,
            ..Self::physical(hex, 0.0, 1.0)
        }
    }

    pub fn with_clearcoat(mut self, clearcoat: f32) -> Self {
        self.clearcoat = clearcoat;
        self
    }

    pub fn with_emissive(mut self, hex: u32, intensity: f32) -> Self {
        self.emissive = Some(Emissive {
            color: Rgb::from_hex(hex),
            intensity,
        });
        self
    }

    /// Transparent sprite material; its color acts as a tint over the label texture.
    pub fn sprite() -> Self {
        Self {
            transparent: true,
            ..Self::basic(0xffffff)
        }
    }

    pub fn emissive_intensity(&self) -> f32 {
        self.emissive.map(|e| e.intensity).unwrap_or(0.0)
    }
}
