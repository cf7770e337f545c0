// Host-side tests for the device scene graph.

use glam::{Vec2, Vec3};
use odar_core::scene::{
    build_device_scene, Material, NodeKind, Primitive, SceneGraph, Transform, DEVICE_NODE,
    GRILLE_LINES, INDICATOR_BASE_INTENSITY, ROOT_NODE, SUB_ASSEMBLIES,
};

#[test]
fn device_hangs_off_the_root() {
    let scene = build_device_scene();
    let g = &scene.graph;
    assert_eq!(g.node(g.root()).name, ROOT_NODE);
    assert_eq!(g.find(DEVICE_NODE), Some(scene.device));
    assert_eq!(g.node(scene.device).parent(), Some(g.root()));
    assert_eq!(g.node(g.root()).children(), &[scene.device]);
}

#[test]
fn every_sub_assembly_is_a_direct_child_of_device_in_order() {
    let scene = build_device_scene();
    let g = &scene.graph;
    let names: Vec<&str> = g
        .node(scene.device)
        .children()
        .iter()
        .map(|&id| g.node(id).name.as_str())
        .collect();
    assert_eq!(names, SUB_ASSEMBLIES);
    for name in SUB_ASSEMBLIES {
        assert!(scene.sub_assembly(name).is_some(), "{}", name);
    }
    // nested parts are not sub-assemblies
    assert_eq!(scene.sub_assembly("enclosure.front"), None);
    assert_eq!(scene.sub_assembly("missing"), None);
}

#[test]
fn everything_but_the_root_lives_under_device() {
    let scene = build_device_scene();
    let g = &scene.graph;
    assert_eq!(g.len(), 39);
    assert_eq!(g.subtree(scene.device).len(), g.len() - 1);
    for (id, node) in g.nodes() {
        if id == g.root() || id == scene.device {
            continue;
        }
        assert!(g.is_ancestor(scene.device, id), "{} escaped the device", node.name);
    }
}

#[test]
fn sub_assembly_part_counts() {
    let scene = build_device_scene();
    let g = &scene.graph;
    let children = |name: &str| g.node(g.find(name).expect(name)).children().len();
    assert_eq!(children("enclosure"), 6);
    assert_eq!(children("display"), 2);
    assert_eq!(children("sensors"), 3);
    assert_eq!(children("buttons"), 3);
    assert_eq!(children("grille"), 1 + 2 * GRILLE_LINES);
    assert_eq!(children("ports"), 2);
    assert_eq!(children("indicator"), 0);
}

#[test]
fn enclosure_panels_are_placed_on_the_shell() {
    let scene = build_device_scene();
    let g = &scene.graph;
    let front = g.find("enclosure.front").expect("front panel");
    assert_eq!(g.node(front).transform.translation, Vec3::new(0.0, 0.0, 0.15));
    match g.node(front).kind {
        NodeKind::Mesh {
            primitive: Primitive::Box { size },
            material,
        } => {
            assert_eq!(size, Vec3::new(1.0, 0.6, 0.05));
            assert_eq!(material.clearcoat, 0.5);
            assert!(!material.unlit);
        }
        ref other => panic!("unexpected front panel {:?}", other),
    }
}

#[test]
fn display_parts_inherit_the_display_offset() {
    let scene = build_device_scene();
    let g = &scene.graph;
    let screen = g.find("display.screen").expect("screen");
    let world = g.world_matrix(screen).transform_point3(Vec3::ZERO);
    assert!(world.abs_diff_eq(Vec3::new(0.0, 0.1, 0.19), 1e-6));
    assert!(g.node(screen).material().expect("mesh").unlit);
}

#[test]
fn indicator_is_an_unlit_emissive_disc() {
    let scene = build_device_scene();
    let node = scene.graph.node(scene.indicator);
    assert_eq!(node.name, "indicator");
    assert_eq!(node.parent(), Some(scene.device));
    let material = node.material().expect("indicator has a material");
    assert!(material.unlit);
    assert_eq!(material.emissive_intensity(), INDICATOR_BASE_INTENSITY);
    assert!(matches!(
        node.kind,
        NodeKind::Mesh {
            primitive: Primitive::Cylinder { radius, .. },
            ..
        } if radius == 0.015
    ));
}

#[test]
fn label_is_a_sprite_in_front_of_the_display() {
    let scene = build_device_scene();
    let node = scene.graph.node(scene.label);
    assert_eq!(node.transform.translation, Vec3::new(0.0, 0.1, 0.2));
    match node.kind {
        NodeKind::Mesh {
            primitive: Primitive::Sprite { size },
            material,
        } => {
            assert_eq!(size, Vec2::new(0.5, 0.25));
            assert!(material.transparent);
        }
        ref other => panic!("unexpected label {:?}", other),
    }
}

#[test]
fn meshes_under_device_skip_groups() {
    let scene = build_device_scene();
    let meshes = scene.graph.meshes_under(scene.device);
    // 30 baked parts plus the label sprite
    assert_eq!(meshes.len(), 31);
    assert!(meshes.iter().all(|m| m.id != scene.device));
}

#[test]
fn duplicate_names_keep_the_first_node() {
    let mut g = SceneGraph::new("root");
    let root = g.root();
    let first = g.add_group(root, "part", Transform::IDENTITY);
    let second = g.add_mesh(
        root,
        "part",
        Transform::at(1.0, 0.0, 0.0),
        Primitive::Box { size: Vec3::ONE },
        Material::basic(0xffffff),
    );
    assert_ne!(first, second);
    assert_eq!(g.find("part"), Some(first));
    assert_eq!(g.len(), 3);
}

#[test]
fn subtree_is_depth_first_in_insertion_order() {
    let mut g = SceneGraph::new("root");
    let root = g.root();
    let a = g.add_group(root, "a", Transform::IDENTITY);
    let a1 = g.add_group(a, "a1", Transform::IDENTITY);
    let b = g.add_group(root, "b", Transform::IDENTITY);
    let a2 = g.add_group(a, "a2", Transform::IDENTITY);
    assert_eq!(g.subtree(root), vec![root, a, a1, a2, b]);
    assert!(g.is_ancestor(root, a2));
    assert!(!g.is_ancestor(b, a2));
}

#[test]
fn relative_matrix_stops_at_the_ancestor() {
    let mut g = SceneGraph::new("root");
    let root = g.root();
    let outer = g.add_group(root, "outer", Transform::at(1.0, 0.0, 0.0));
    let inner = g.add_group(outer, "inner", Transform::at(0.0, 2.0, 0.0));
    let rel = g.matrix_relative_to(inner, outer).transform_point3(Vec3::ZERO);
    let world = g.world_matrix(inner).transform_point3(Vec3::ZERO);
    assert_eq!(rel, Vec3::new(0.0, 2.0, 0.0));
    assert_eq!(world, Vec3::new(1.0, 2.0, 0.0));
}
