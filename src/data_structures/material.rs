//! Immutable shading parameters.

/// Lighting model a renderer should use for a material.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shading {
    Phong,
    Standard,
    Physical,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Front,
    Double,
}

/// A shading-parameter set. Shared across instances behind an `Rc` and never
/// mutated; a changed material is a new material.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub name: &'static str,
    pub shading: Shading,
    pub color: u32,
    pub opacity: f32,
    pub transparent: bool,
    pub side: Side,
    pub emissive: Option<u32>,
    pub emissive_intensity: f32,
    pub roughness: f32,
    pub metalness: f32,
    pub shininess: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: "material",
            shading: Shading::Phong,
            color: 0xffffff,
            opacity: 1.0,
            transparent: false,
            side: Side::Front,
            emissive: None,
            emissive_intensity: 1.0,
            roughness: 1.0,
            metalness: 0.0,
            shininess: 30.0,
        }
    }
}

impl Material {
    pub fn phong(name: &'static str, color: u32) -> Self {
        Self {
            name,
            color,
            ..Default::default()
        }
    }

    pub fn standard(name: &'static str, color: u32, roughness: f32, metalness: f32) -> Self {
        Self {
            name,
            shading: Shading::Standard,
            color,
            roughness,
            metalness,
            ..Default::default()
        }
    }

    /// Physically based material, used for glazing.
    pub fn physical(name: &'static str, color: u32, roughness: f32) -> Self {
        Self {
            name,
            shading: Shading::Physical,
            color,
            roughness,
            ..Default::default()
        }
    }

    pub fn translucent(mut self, opacity: f32) -> Self {
        self.transparent = true;
        self.opacity = opacity;
        self
    }

    pub fn double_sided(mut self) -> Self {
        self.side = Side::Double;
        self
    }

    pub fn with_shininess(mut self, shininess: f32) -> Self {
        self.shininess = shininess;
        self
    }

    pub fn with_emissive(mut self, color: u32, intensity: f32) -> Self {
        self.emissive = Some(color);
        self.emissive_intensity = intensity;
        self
    }

    pub fn is_transparent(&self) -> bool {
        self.transparent && self.opacity < 1.0
    }
}
