//! Flat scene graph with world-space queries

use crate::node::{MeshNode, SceneNode};
use strider_core::{NodeId, Ray, RayHit};

/// A loaded scene: nodes with composed world transforms, in load order
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    pub name: String,
    nodes: Vec<SceneNode>,
}

impl SceneGraph {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: Vec::new(),
        }
    }

    /// Append a node, returning its id
    pub fn add(&mut self, node: SceneNode) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());
        self.nodes.push(node);
        id
    }

    pub fn add_mesh(&mut self, mesh: MeshNode) -> NodeId {
        self.add(SceneNode::Mesh(mesh))
    }

    pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id.index())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(id.index())
    }

    pub fn mesh(&self, id: NodeId) -> Option<&MeshNode> {
        self.get(id).and_then(SceneNode::as_mesh)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes with their ids, in load order
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SceneNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeId::from_index(i), node))
    }

    /// Ids of every renderable mesh
    pub fn renderable_ids(&self) -> Vec<NodeId> {
        self.iter()
            .filter(|(_, node)| node.is_renderable())
            .map(|(id, _)| id)
            .collect()
    }

    /// Cast a ray against `candidates`, or against every renderable mesh when
    /// `candidates` is `None`. Hits are ordered nearest first and limited to
    /// `max_distance`.
    pub fn cast_ray(
        &self,
        ray: &Ray,
        max_distance: f32,
        candidates: Option<&[NodeId]>,
    ) -> Vec<RayHit> {
        let ids = match candidates {
            Some(ids) => ids.to_vec(),
            None => self.renderable_ids(),
        };

        let mut hits: Vec<RayHit> = ids
            .into_iter()
            .filter_map(|id| {
                let mesh = self.get(id).filter(|n| n.is_renderable())?.as_mesh()?;
                let distance = mesh.raycast(ray)?;
                (distance <= max_distance).then(|| RayHit {
                    node: id,
                    point: ray.at(distance),
                    distance,
                })
            })
            .collect();

        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }
}
