use crate::data_structures::material::Material;

/// Write-once table of materials, looked up by tag.
///
/// Definitions are appended in order and never updated or removed. A lookup
/// returns the first definition with a matching tag, so a later duplicate is
/// never visible.
#[derive(Clone, Debug, Default)]
pub struct MaterialRegistry {
    materials: Vec<(String, Material)>,
}

impl MaterialRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(&mut self, tag: &str, material: Material) {
        if self.find(tag).is_some() {
            log::warn!("Material '{tag}' defined twice; lookups keep returning the first definition");
        }
        self.materials.push((tag.to_string(), material));
    }

    pub fn find(&self, tag: &str) -> Option<&Material> {
        self.materials
            .iter()
            .find(|(t, _)| t == tag)
            .map(|(_, material)| material)
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.materials.iter().map(|(tag, _)| tag.as_str())
    }
}
