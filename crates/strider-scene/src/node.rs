//! Typed scene nodes

use strider_core::{ray_aabb, ray_triangle, Aabb, Mat4, Ray, Vec3};

/// A static mesh placed in the world.
///
/// Geometry is stored in local space together with the node's world
/// transform, so `world_bounds` always reflects the current placement.
#[derive(Debug, Clone)]
pub struct MeshNode {
    pub name: String,
    pub visible: bool,
    /// Local-space bounds of all primitives
    pub local_bounds: Aabb,
    /// Local-to-world transform
    pub transform: Mat4,
    /// Optional local-space triangles for exact ray casts
    pub triangles: Vec<[Vec3; 3]>,
}

impl MeshNode {
    /// A box-shaped mesh spanning `bounds` in world space
    pub fn from_bounds(name: impl Into<String>, bounds: Aabb) -> Self {
        Self {
            name: name.into(),
            visible: true,
            local_bounds: bounds,
            transform: Mat4::IDENTITY,
            triangles: Vec::new(),
        }
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn with_transform(mut self, transform: Mat4) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_triangles(mut self, triangles: Vec<[Vec3; 3]>) -> Self {
        self.triangles = triangles;
        self
    }

    pub fn world_bounds(&self) -> Aabb {
        self.local_bounds.transformed(&self.transform)
    }

    /// Nearest intersection distance along `ray`.
    ///
    /// Uses triangles when the mesh has them, otherwise the world bounds.
    pub fn raycast(&self, ray: &Ray) -> Option<f32> {
        if self.triangles.is_empty() {
            return ray_aabb(ray, &self.world_bounds());
        }

        // Cheap reject before touching triangles
        ray_aabb(ray, &self.world_bounds())?;

        self.triangles
            .iter()
            .filter_map(|tri| {
                let world = [
                    self.transform.transform_point3(tri[0]),
                    self.transform.transform_point3(tri[1]),
                    self.transform.transform_point3(tri[2]),
                ];
                ray_triangle(ray, &world)
            })
            .min_by(|a, b| a.total_cmp(b))
    }
}

/// A non-renderable grouping node (glTF empties, lights, cameras)
#[derive(Debug, Clone)]
pub struct GroupNode {
    pub name: String,
    pub transform: Mat4,
}

/// Any node of a loaded scene
#[derive(Debug, Clone)]
pub enum SceneNode {
    Mesh(MeshNode),
    Group(GroupNode),
}

impl SceneNode {
    pub fn name(&self) -> &str {
        match self {
            SceneNode::Mesh(mesh) => &mesh.name,
            SceneNode::Group(group) => &group.name,
        }
    }

    /// Visible geometry that can be classified and ray-cast
    pub fn is_renderable(&self) -> bool {
        matches!(self, SceneNode::Mesh(mesh) if mesh.visible)
    }

    pub fn as_mesh(&self) -> Option<&MeshNode> {
        match self {
            SceneNode::Mesh(mesh) => Some(mesh),
            SceneNode::Group(_) => None,
        }
    }

    /// World bounds, `None` for nodes without geometry
    pub fn world_bounds(&self) -> Option<Aabb> {
        self.as_mesh().map(MeshNode::world_bounds)
    }

    pub fn transform(&self) -> Mat4 {
        match self {
            SceneNode::Mesh(mesh) => mesh.transform,
            SceneNode::Group(group) => group.transform,
        }
    }

    pub fn set_transform(&mut self, transform: Mat4) {
        match self {
            SceneNode::Mesh(mesh) => mesh.transform = transform,
            SceneNode::Group(group) => group.transform = transform,
        }
    }
}
