use cgmath::Vector3;
use scene_ngin::{data_structures::material::Material, resources::material::MaterialRegistry};

#[test]
fn should_return_the_first_definition_of_a_tag() {
    let mut registry = MaterialRegistry::new();
    let first = Material::new().with_shininess(10.0);
    let second = Material::new().with_shininess(99.0);

    registry.define("wood", first);
    registry.define("wood", second);

    assert_eq!(registry.len(), 2);
    assert_eq!(registry.find("wood"), Some(&first));
}

#[test]
fn should_not_find_undefined_materials() {
    let mut registry = MaterialRegistry::new();
    assert!(registry.find("glass").is_none());

    registry.define("metal", Material::new());
    assert!(registry.find("glass").is_none());
    assert!(registry.find("Metal").is_none());
}

#[test]
fn should_keep_definition_order() {
    let mut registry = MaterialRegistry::new();
    for tag in ["wood", "ceramic", "fabric"] {
        registry.define(tag, Material::new());
    }
    assert_eq!(registry.tags().collect::<Vec<_>>(), vec!["wood", "ceramic", "fabric"]);
}

#[test]
fn should_build_materials_from_their_parts() {
    let ceramic = Material::new()
        .with_ambient(0.95, 0.92, 0.85, 0.4)
        .with_diffuse(0.96, 0.93, 0.86)
        .with_specular(0.9, 0.9, 0.88)
        .with_shininess(96.0);

    assert_eq!(ceramic.ambient_color, Vector3::new(0.95, 0.92, 0.85));
    assert_eq!(ceramic.ambient_strength, 0.4);
    assert_eq!(ceramic.diffuse_color, Vector3::new(0.96, 0.93, 0.86));
    assert_eq!(ceramic.specular_color, Vector3::new(0.9, 0.9, 0.88));
    assert_eq!(ceramic.shininess, 96.0);
}
