use super::material::Material;
use fnv::FnvHashMap;
use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};
use smallvec::SmallVec;

/// Index of a node inside its `SceneGraph` arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Local transform of a node relative to its parent.
///
/// Rotation is stored as XYZ Euler angles in radians so that incremental
/// yaw/pitch updates stay additive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    pub fn at(x: f32, y: f32, z: f32) -> Self {
        Self {
            translation: Vec3::new(x, y, z),
            ..Self::IDENTITY
        }
    }

    pub fn rotated(mut self, x: f32, y: f32, z: f32) -> Self {
        self.rotation = Vec3::new(x, y, z);
        self
    }

    pub fn quat(&self) -> Quat {
        Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        )
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.quat(), self.translation)
    }
}

/// Geometric primitive attached to a mesh node, in node-local space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Primitive {
    /// Axis-aligned box centered on the origin.
    Box { size: Vec3 },
    /// Y-axis aligned cylinder centered on the origin.
    Cylinder {
        radius: f32,
        height: f32,
        segments: u32,
    },
    /// Camera-facing quad; drawn by the label pipeline, not baked with the device.
    Sprite { size: Vec2 },
}

#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    Group,
    Mesh {
        primitive: Primitive,
        material: Material,
    },
}

#[derive(Clone, Debug)]
pub struct SceneNode {
    pub name: String,
    pub transform: Transform,
    pub kind: NodeKind,
    parent: Option<NodeId>,
    children: SmallVec<[NodeId; 8]>,
}

impl SceneNode {
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn material(&self) -> Option<&Material> {
        match &self.kind {
            NodeKind::Mesh { material, .. } => Some(material),
            NodeKind::Group => None,
        }
    }

    pub fn material_mut(&mut self) -> Option<&mut Material> {
        match &mut self.kind {
            NodeKind::Mesh { material, .. } => Some(material),
            NodeKind::Group => None,
        }
    }
}

/// A mesh node resolved against an ancestor: its matrix relative to that ancestor.
#[derive(Clone, Copy, Debug)]
pub struct ResolvedMesh<'a> {
    pub id: NodeId,
    pub matrix: Mat4,
    pub primitive: &'a Primitive,
    pub material: &'a Material,
}

/// Arena-backed scene graph with a name index.
#[derive(Clone, Debug)]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
    names: FnvHashMap<String, NodeId>,
    root: NodeId,
}

impl SceneGraph {
    pub fn new(root_name: &str) -> Self {
        let mut graph = Self {
            nodes: Vec::new(),
            names: FnvHashMap::default(),
            root: NodeId(0),
        };
        graph.root = graph.insert(None, root_name, Transform::IDENTITY, NodeKind::Group);
        graph
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn add_group(&mut self, parent: NodeId, name: &str, transform: Transform) -> NodeId {
        self.insert(Some(parent), name, transform, NodeKind::Group)
    }

    pub fn add_mesh(
        &mut self,
        parent: NodeId,
        name: &str,
        transform: Transform,
        primitive: Primitive,
        material: Material,
    ) -> NodeId {
        self.insert(
            Some(parent),
            name,
            transform,
            NodeKind::Mesh {
                primitive,
                material,
            },
        )
    }

    fn insert(
        &mut self,
        parent: Option<NodeId>,
        name: &str,
        transform: Transform,
        kind: NodeKind,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(SceneNode {
            name: name.to_string(),
            transform,
            kind,
            parent,
            children: SmallVec::new(),
        });
        if let Some(p) = parent {
            self.nodes[p.0].children.push(id);
        }
        if self.names.contains_key(name) {
            log::warn!("[scene] duplicate node name '{}', lookup keeps the first", name);
        } else {
            self.names.insert(name.to_string(), id);
        }
        id
    }

    pub fn node(&self, id: NodeId) -> &SceneNode {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut SceneNode {
        &mut self.nodes[id.0]
    }

    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.names.get(name).copied()
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &SceneNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Depth-first list of `id` and everything below it.
    pub fn subtree(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(cur) = stack.pop() {
            out.push(cur);
            // reversed so children come out in insertion order
            stack.extend(self.nodes[cur.0].children.iter().rev().copied());
        }
        out
    }

    pub fn is_ancestor(&self, ancestor: NodeId, mut id: NodeId) -> bool {
        while let Some(p) = self.nodes[id.0].parent {
            if p == ancestor {
                return true;
            }
            id = p;
        }
        false
    }

    /// Matrix mapping `id`'s local space into `ancestor`'s local space.
    ///
    /// Stops at the root if `ancestor` is not actually above `id`.
    pub fn matrix_relative_to(&self, id: NodeId, ancestor: NodeId) -> Mat4 {
        let mut m = Mat4::IDENTITY;
        let mut cur = Some(id);
        while let Some(c) = cur {
            if c == ancestor {
                break;
            }
            let node = &self.nodes[c.0];
            m = node.transform.matrix() * m;
            cur = node.parent;
        }
        m
    }

    pub fn world_matrix(&self, id: NodeId) -> Mat4 {
        let mut m = Mat4::IDENTITY;
        let mut cur = Some(id);
        while let Some(c) = cur {
            let node = &self.nodes[c.0];
            m = node.transform.matrix() * m;
            cur = node.parent;
        }
        m
    }

    /// All mesh nodes strictly below `ancestor`, with matrices relative to it.
    pub fn meshes_under(&self, ancestor: NodeId) -> Vec<ResolvedMesh<'_>> {
        self.subtree(ancestor)
            .into_iter()
            .filter(|&id| id != ancestor)
            .filter_map(|id| match &self.nodes[id.0].kind {
                NodeKind::Mesh {
                    primitive,
                    material,
                } => Some(ResolvedMesh {
                    id,
                    matrix: self.matrix_relative_to(id, ancestor),
                    primitive,
                    material,
                }),
                NodeKind::Group => None,
            })
            .collect()
    }
}
