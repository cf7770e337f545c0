//! Hand-placed primitives approximating the OdAR handheld unit.
//!
//! All dimensions are in scene units (1 unit ≈ 100 mm, the enclosure is
//! 1.0 × 0.6 × 0.3). Every sub-assembly hangs off a single `device` node so the
//! whole unit rotates as one rigid body.

use super::graph::{NodeId, Primitive, SceneGraph, Transform};
use super::material::Material;
use crate::constants::{CYLINDER_SEGMENTS, LABEL_WORLD_SIZE};
use glam::{Vec2, Vec3};
use std::f32::consts::FRAC_PI_2;

pub const ROOT_NODE: &str = "scene";
pub const DEVICE_NODE: &str = "device";

/// Direct children of the device node, in build order.
pub const SUB_ASSEMBLIES: [&str; 8] = [
    "enclosure",
    "display",
    "sensors",
    "buttons",
    "grille",
    "indicator",
    "ports",
    "label",
];

const INDICATOR_RGB: u32 = 0x22ff22;
pub const INDICATOR_BASE_INTENSITY: f32 = 0.5;

/// Built scene plus handles to the nodes the viewer mutates each frame.
#[derive(Clone, Debug)]
pub struct DeviceScene {
    pub graph: SceneGraph,
    /// Rigid parent of every sub-assembly; the only node drag/auto-rotate touches.
    pub device: NodeId,
    pub indicator: NodeId,
    pub label: NodeId,
}

impl DeviceScene {
    pub fn sub_assembly(&self, name: &str) -> Option<NodeId> {
        self.graph
            .find(name)
            .filter(|&id| self.graph.node(id).parent() == Some(self.device))
    }
}

#[inline]
fn cuboid(x: f32, y: f32, z: f32) -> Primitive {
    Primitive::Box {
        size: Vec3::new(x, y, z),
    }
}

#[inline]
fn disc(radius: f32, height: f32) -> Primitive {
    Primitive::Cylinder {
        radius,
        height,
        segments: CYLINDER_SEGMENTS,
    }
}

pub fn build_device_scene() -> DeviceScene {
    let mut graph = SceneGraph::new(ROOT_NODE);
    let root = graph.root();
    let device = graph.add_group(root, DEVICE_NODE, Transform::IDENTITY);

    build_enclosure(&mut graph, device);
    build_display(&mut graph, device);
    build_sensors(&mut graph, device);
    build_buttons(&mut graph, device);
    build_grille(&mut graph, device);
    let indicator = build_indicator(&mut graph, device);
    build_ports(&mut graph, device);
    let label = build_label(&mut graph, device);

    log::info!("[scene] built device scene with {} nodes", graph.len());
    DeviceScene {
        graph,
        device,
        indicator,
        label,
    }
}

fn shell(hex: u32) -> Material {
    Material::physical(hex, 0.1, 0.2).with_clearcoat(0.5)
}

fn build_enclosure(g: &mut SceneGraph, device: NodeId) -> NodeId {
    let group = g.add_group(device, "enclosure", Transform::IDENTITY);
    let panels = [
        ("enclosure.front", cuboid(1.0, 0.6, 0.05), Transform::at(0.0, 0.0, 0.15), 0xbfddf5),
        ("enclosure.back", cuboid(1.0, 0.6, 0.05), Transform::at(0.0, 0.0, -0.15), 0x89b4d9),
        ("enclosure.top", cuboid(1.0, 0.05, 0.3), Transform::at(0.0, 0.3, 0.0), 0xd5e6f3),
        ("enclosure.bottom", cuboid(1.0, 0.05, 0.3), Transform::at(0.0, -0.3, 0.0), 0xd5e6f3),
        ("enclosure.left", cuboid(0.05, 0.6, 0.3), Transform::at(-0.5, 0.0, 0.0), 0x9abcdd),
        ("enclosure.right", cuboid(0.05, 0.6, 0.3), Transform::at(0.5, 0.0, 0.0), 0x9abcdd),
    ];
    for (name, prim, t, hex) in panels {
        g.add_mesh(group, name, t, prim, shell(hex));
    }
    group
}

fn build_display(g: &mut SceneGraph, device: NodeId) -> NodeId {
    // whole display sits above the button row
    let group = g.add_group(device, "display", Transform::at(0.0, 0.1, 0.0));
    g.add_mesh(
        group,
        "display.frame",
        Transform::at(0.0, 0.0, 0.18),
        cuboid(0.35, 0.175, 0.01),
        Material::physical(0x222222, 0.5, 0.2),
    );
    g.add_mesh(
        group,
        "display.screen",
        Transform::at(0.0, 0.0, 0.19),
        cuboid(0.3, 0.125, 0.005),
        Material::basic(0x111111),
    );
    group
}

fn build_sensors(g: &mut SceneGraph, device: NodeId) -> NodeId {
    let group = g.add_group(device, "sensors", Transform::IDENTITY);
    let material = Material::physical(0xe1e1e1, 0.2, 0.3);
    g.add_mesh(
        group,
        "sensors.front",
        Transform::at(-0.25, 0.1, 0.18).rotated(FRAC_PI_2, 0.0, 0.0),
        disc(0.05, 0.01),
        material,
    );
    g.add_mesh(
        group,
        "sensors.side",
        Transform::at(0.51, 0.0, 0.0).rotated(0.0, 0.0, FRAC_PI_2),
        disc(0.04, 0.01),
        material,
    );
    g.add_mesh(
        group,
        "sensors.top",
        Transform::at(0.2, 0.33, 0.0),
        disc(0.04, 0.01),
        material,
    );
    group
}

fn build_buttons(g: &mut SceneGraph, device: NodeId) -> NodeId {
    let group = g.add_group(device, "buttons", Transform::IDENTITY);
    let material = Material::physical(0x444444, 0.3, 0.4);
    for i in 0..3 {
        g.add_mesh(
            group,
            &format!("buttons.{i}"),
            Transform::at(-0.15 + i as f32 * 0.15, -0.15, 0.18).rotated(FRAC_PI_2, 0.0, 0.0),
            disc(0.04, 0.01),
            material,
        );
    }
    group
}

pub const GRILLE_LINES: usize = 6;
const GRILLE_PITCH: f32 = 0.016;

fn build_grille(g: &mut SceneGraph, device: NodeId) -> NodeId {
    let group = g.add_group(device, "grille", Transform::IDENTITY);
    g.add_mesh(
        group,
        "grille.back",
        Transform::at(0.35, 0.1, 0.18),
        cuboid(0.1, 0.1, 0.01),
        Material::physical(0x222222, 0.4, 0.2),
    );
    let line = Material::basic(0x555555);
    for i in 0..GRILLE_LINES {
        g.add_mesh(
            group,
            &format!("grille.v{i}"),
            Transform::at(0.31 + i as f32 * GRILLE_PITCH, 0.1, 0.185),
            cuboid(0.005, 0.1, 0.005),
            line,
        );
    }
    for i in 0..GRILLE_LINES {
        g.add_mesh(
            group,
            &format!("grille.h{i}"),
            Transform::at(0.35, 0.06 + i as f32 * GRILLE_PITCH, 0.185),
            cuboid(0.1, 0.005, 0.005),
            line,
        );
    }
    group
}

fn build_indicator(g: &mut SceneGraph, device: NodeId) -> NodeId {
    g.add_mesh(
        device,
        "indicator",
        Transform::at(-0.3, -0.15, 0.18).rotated(FRAC_PI_2, 0.0, 0.0),
        disc(0.015, 0.005),
        Material::basic(INDICATOR_RGB).with_emissive(INDICATOR_RGB, INDICATOR_BASE_INTENSITY),
    )
}

fn build_ports(g: &mut SceneGraph, device: NodeId) -> NodeId {
    let group = g.add_group(device, "ports", Transform::IDENTITY);
    g.add_mesh(
        group,
        "ports.data",
        Transform::at(0.35, -0.15, 0.18),
        cuboid(0.075, 0.04, 0.01),
        Material::physical(0x111111, 0.7, 0.2),
    );
    g.add_mesh(
        group,
        "ports.switch",
        Transform::at(0.45, -0.15, 0.18),
        cuboid(0.05, 0.025, 0.01),
        Material::physical(0x333333, 0.5, 0.3),
    );
    group
}

fn build_label(g: &mut SceneGraph, device: NodeId) -> NodeId {
    g.add_mesh(
        device,
        "label",
        Transform::at(0.0, 0.1, 0.2),
        Primitive::Sprite {
            size: Vec2::from(LABEL_WORLD_SIZE),
        },
        Material::sprite(),
    )
}
