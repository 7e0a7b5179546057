//! Simulation materials and their physical/visual properties.
//!
//! A material determines a collider's density and restitution when a scene
//! is rebuilt, and selects the texture layer the renderer samples for filled
//! shapes. The set is small and fixed; serialized form is the lowercase
//! material name.

use serde::{Deserialize, Serialize};

/// Material assigned to a simulation object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Material {
    /// Dense, barely bouncy.
    Metal,
    /// Light, bouncy.
    Rubber,
}

impl Material {
    /// Collider density in kg/m^2.
    pub fn density(self) -> f32 {
        match self {
            Material::Metal => 10.0,
            Material::Rubber => 5.0,
        }
    }

    /// Coefficient of restitution.
    pub fn restitution(self) -> f32 {
        match self {
            Material::Metal => 0.02,
            Material::Rubber => 0.35,
        }
    }

    /// Layer index into the renderer's material texture array.
    pub fn texture_layer(self) -> u32 {
        match self {
            Material::Metal => 0,
            Material::Rubber => 1,
        }
    }

    /// Encode this material into rapier collider `user_data`.
    ///
    /// Zero is reserved for "no material recorded" so that colliders created
    /// outside this crate decode to the default.
    pub fn to_user_data(self) -> u128 {
        self.texture_layer() as u128 + 1
    }

    /// Decode a material from rapier collider `user_data`.
    ///
    /// Unknown or unset values fall back to [`Material::Metal`].
    pub fn from_user_data(data: u128) -> Material {
        match data {
            2 => Material::Rubber,
            _ => Material::Metal,
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Material::Metal
    }
}
