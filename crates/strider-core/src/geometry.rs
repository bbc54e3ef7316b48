//! World-space geometry: bounding boxes, rays, and intersection tests

use crate::id::NodeId;
use glam::{Mat4, Vec3};

/// Axis-aligned bounding box in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Create from min and max corners
    pub fn from_min_max(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create from center position and half-extents
    pub fn from_center_half(center: Vec3, half: Vec3) -> Self {
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Smallest box containing every point, `None` for an empty iterator
    pub fn from_points<I: IntoIterator<Item = Vec3>>(points: I) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut aabb = Self::from_min_max(first, first);
        for p in iter {
            aabb.min = aabb.min.min(p);
            aabb.max = aabb.max.max(p);
        }
        Some(aabb)
    }

    /// Extents along each axis
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Footprint area on the horizontal plane (x-extent * z-extent)
    pub fn xz_area(&self) -> f32 {
        let size = self.size();
        size.x * size.z
    }

    /// World Y of the top face
    pub fn top(&self) -> f32 {
        self.max.y
    }

    /// Whether (x, z) lies inside the XZ rectangle grown by `pad` on every side.
    /// Edges count as inside.
    pub fn contains_xz_padded(&self, x: f32, z: f32, pad: f32) -> bool {
        x >= self.min.x - pad
            && x <= self.max.x + pad
            && z >= self.min.z - pad
            && z <= self.max.z + pad
    }

    /// Inclusive overlap test; boxes that only touch are intersecting.
    pub fn intersects(&self, other: &Aabb) -> bool {
        !(other.max.x < self.min.x
            || other.min.x > self.max.x
            || other.max.y < self.min.y
            || other.min.y > self.max.y
            || other.max.z < self.min.z
            || other.min.z > self.max.z)
    }

    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    pub fn union(&self, other: &Aabb) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Transform by a world matrix, returning the enclosing axis-aligned box.
    pub fn transformed(&self, mat: &Mat4) -> Self {
        let cols = mat.to_cols_array_2d();
        let mut new_min = Vec3::new(cols[3][0], cols[3][1], cols[3][2]);
        let mut new_max = new_min;

        let src_min = self.min.to_array();
        let src_max = self.max.to_array();

        // Project each source axis through the rotation/scale part
        for i in 0..3 {
            for j in 0..3 {
                let a = cols[i][j] * src_min[i];
                let b = cols[i][j] * src_max[i];
                new_min[j] += a.min(b);
                new_max[j] += a.max(b);
            }
        }

        Self {
            min: new_min,
            max: new_max,
        }
    }
}

/// A ray in 3D space. `direction` is always unit length.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        let direction = direction.try_normalize().unwrap_or(Vec3::NEG_Y);
        Self { origin, direction }
    }

    /// Ray pointing straight down from `origin`
    pub fn down(origin: Vec3) -> Self {
        Self {
            origin,
            direction: Vec3::NEG_Y,
        }
    }

    pub fn at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction * distance
    }
}

/// One intersection of a ray with a scene node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub node: NodeId,
    pub point: Vec3,
    pub distance: f32,
}

/// Ray-AABB intersection using the slab method (Kay/Kajiya).
/// Returns the distance along the ray to the nearest hit, or None if no intersection.
pub fn ray_aabb(ray: &Ray, aabb: &Aabb) -> Option<f32> {
    let mut tmin = f32::NEG_INFINITY;
    let mut tmax = f32::INFINITY;

    for i in 0..3 {
        let origin = ray.origin[i];
        let dir = ray.direction[i];
        if dir.abs() < 1e-8 {
            // Parallel to this slab
            if origin < aabb.min[i] || origin > aabb.max[i] {
                return None;
            }
        } else {
            let inv_d = 1.0 / dir;
            let mut t1 = (aabb.min[i] - origin) * inv_d;
            let mut t2 = (aabb.max[i] - origin) * inv_d;

            if t1 > t2 {
                std::mem::swap(&mut t1, &mut t2);
            }

            tmin = tmin.max(t1);
            tmax = tmax.min(t2);

            if tmin > tmax {
                return None;
            }
        }
    }

    if tmax < 0.0 {
        None // behind the ray
    } else {
        Some(tmin.max(0.0))
    }
}

/// Two-sided ray-triangle intersection (Möller–Trumbore).
pub fn ray_triangle(ray: &Ray, tri: &[Vec3; 3]) -> Option<f32> {
    const EPS: f32 = 1e-7;

    let edge1 = tri[1] - tri[0];
    let edge2 = tri[2] - tri[0];
    let p = ray.direction.cross(edge2);
    let det = edge1.dot(p);
    if det.abs() < EPS {
        return None;
    }

    let inv_det = 1.0 / det;
    let s = ray.origin - tri[0];
    let u = s.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = ray.direction.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = edge2.dot(q) * inv_det;
    (t >= 0.0).then_some(t)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> Aabb {
        Aabb::from_min_max(Vec3::ZERO, Vec3::ONE)
    }

    #[test]
    fn area_and_top() {
        let b = Aabb::from_min_max(Vec3::new(-1.0, 0.0, -2.0), Vec3::new(1.0, 0.5, 2.0));
        assert!((b.xz_area() - 8.0).abs() < 1e-6);
        assert!((b.top() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn padded_containment_includes_margin() {
        let b = unit_box();
        assert!(b.contains_xz_padded(1.15, 0.5, 0.2));
        assert!(!b.contains_xz_padded(1.25, 0.5, 0.2));
        assert!(!b.contains_xz_padded(1.15, 0.5, 0.0));
    }

    #[test]
    fn touching_boxes_intersect() {
        let a = unit_box();
        let b = a.translated(Vec3::new(1.0, 0.0, 0.0));
        let c = a.translated(Vec3::new(1.01, 0.0, 0.0));
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn transformed_by_translation_and_scale() {
        let mat = Mat4::from_scale_rotation_translation(
            Vec3::splat(2.0),
            glam::Quat::IDENTITY,
            Vec3::new(5.0, 0.0, 0.0),
        );
        let t = unit_box().transformed(&mat);
        assert!((t.min - Vec3::new(5.0, 0.0, 0.0)).length() < 1e-5);
        assert!((t.max - Vec3::new(7.0, 2.0, 2.0)).length() < 1e-5);
    }

    #[test]
    fn ray_hits_box_top_from_above() {
        let ray = Ray::down(Vec3::new(0.5, 20.0, 0.5));
        let dist = ray_aabb(&ray, &unit_box()).unwrap();
        assert!((dist - 19.0).abs() < 1e-5);
        assert!((ray.at(dist).y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn ray_misses_box_beside_it() {
        let ray = Ray::down(Vec3::new(3.0, 20.0, 0.5));
        assert!(ray_aabb(&ray, &unit_box()).is_none());
    }

    #[test]
    fn ray_hits_triangle() {
        let tri = [
            Vec3::new(-1.0, 0.5, -1.0),
            Vec3::new(1.0, 0.5, -1.0),
            Vec3::new(0.0, 0.5, 1.0),
        ];
        let ray = Ray::down(Vec3::new(0.0, 20.0, 0.0));
        let t = ray_triangle(&ray, &tri).unwrap();
        assert!((t - 19.5).abs() < 1e-4);

        let miss = Ray::down(Vec3::new(5.0, 20.0, 0.0));
        assert!(ray_triangle(&miss, &tri).is_none());
    }
}
