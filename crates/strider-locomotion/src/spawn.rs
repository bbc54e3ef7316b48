//! Spawn placement after a scene load
//!
//! The character is placed on the largest ground mesh at the obstacle-free
//! grid point farthest from that mesh's centre. When the placed character
//! still overlaps an obstacle, [`unstick`] searches rings around it.

use crate::world::WalkableWorld;
use serde::{Deserialize, Serialize};
use strider_core::{Aabb, Vec3};

/// Tuning for spawn placement and unstick search
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnSettings {
    /// Grid points per side over the largest ground mesh
    pub grid: usize,
    /// Radius added per unstick ring
    pub unstick_step: f32,
    pub unstick_rings: usize,
}

impl Default for SpawnSettings {
    fn default() -> Self {
        Self {
            grid: 9,
            unstick_step: 0.3,
            unstick_rings: 20,
        }
    }
}

/// Where placement put the character
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// An obstacle-free grid point
    Grid(Vec3),
    /// No grid point survived; centre of the largest ground mesh
    Fallback(Vec3),
}

impl Placement {
    pub fn position(&self) -> Vec3 {
        match self {
            Placement::Grid(p) | Placement::Fallback(p) => *p,
        }
    }
}

/// Final spawn after placement and unstick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnResult {
    pub position: Vec3,
    pub placement: Placement,
    /// The placed position overlapped an obstacle and was moved
    pub unstuck: bool,
}

/// Unit directions of one unstick ring, N first, clockwise seen from above
const RING_DIRECTIONS: [(f32, f32); 8] = [
    (0.0, -1.0),
    (1.0, -1.0),
    (1.0, 0.0),
    (1.0, 1.0),
    (0.0, 1.0),
    (-1.0, 1.0),
    (-1.0, 0.0),
    (-1.0, -1.0),
];

/// Largest-area ground mesh bounds, first on ties
fn largest_ground(world: &WalkableWorld) -> Option<Aabb> {
    world
        .classified
        .ground
        .iter()
        .filter_map(|&id| world.scene.mesh(id))
        .map(|mesh| mesh.world_bounds())
        .fold(None, |best: Option<Aabb>, bounds| match best {
            Some(b) if b.xz_area() >= bounds.xz_area() => Some(b),
            _ => Some(bounds),
        })
}

/// Pick a spawn point on the largest ground mesh.
///
/// Grid points are scanned X-major. Ties on distance keep the first found.
/// Returns `None` when the scene has no ground mesh to place on.
pub fn place_character(world: &WalkableWorld, settings: &SpawnSettings) -> Option<Placement> {
    let bounds = largest_ground(world)?;
    let pad = world.ground_settings().padding;
    let center = bounds.center();
    let query_y = bounds.top();
    let correction = world.vertical_correction();
    let sampler = world.sampler();
    let resolver = world.resolver();

    let half_x = bounds.size().x * 0.5 + pad;
    let half_z = bounds.size().z * 0.5 + pad;
    let n = settings.grid.max(1);
    // -1..=1 across the grid
    let unit = |i: usize| {
        if n == 1 {
            0.0
        } else {
            2.0 * i as f32 / (n - 1) as f32 - 1.0
        }
    };

    let mut best: Option<(f32, Vec3)> = None;
    let mut candidates = 0usize;

    let (lo_x, hi_x) = (bounds.min.x - pad, bounds.max.x + pad);
    let (lo_z, hi_z) = (bounds.min.z - pad, bounds.max.z + pad);

    for i in 0..n {
        for j in 0..n {
            // Offsets are symmetric about the centre so mirrored points tie
            // exactly; rounding can push edge points past the padded rect
            let (dx, dz) = (half_x * unit(i), half_z * unit(j));
            let x = (center.x + dx).clamp(lo_x, hi_x);
            let z = (center.z + dz).clamp(lo_z, hi_z);
            if !bounds.contains_xz_padded(x, z, pad) {
                continue;
            }
            let Some(ground) = sampler.sample(x, z, query_y) else {
                continue;
            };
            let candidate = Vec3::new(x, ground + correction, z);

            if resolver.is_blocked(candidate) {
                continue;
            }
            candidates += 1;

            let distance = Vec3::new(dx, 0.0, dz).length();
            if best.map_or(true, |(d, _)| distance > d) {
                best = Some((distance, candidate));
            }
        }
    }

    log::debug!(
        "Spawn grid {}x{} on '{}': {} free candidates",
        n,
        n,
        world.scene.name,
        candidates
    );

    Some(match best {
        Some((_, position)) => Placement::Grid(position),
        None => Placement::Fallback(Vec3::new(center.x, bounds.top() + correction, center.z)),
    })
}

/// First obstacle-free position on rings around `position`.
///
/// Ring `r` (1-based) has radius `r * unstick_step`; each ring tries the eight
/// compass and diagonal directions. Every tried position is re-sampled for
/// ground height. `None` when every ring is exhausted.
pub fn unstick(world: &WalkableWorld, position: Vec3, settings: &SpawnSettings) -> Option<Vec3> {
    let resolver = world.resolver();
    for ring in 1..=settings.unstick_rings {
        let radius = ring as f32 * settings.unstick_step;
        for (dx, dz) in RING_DIRECTIONS {
            let dir = Vec3::new(dx, 0.0, dz).normalize();
            let x = position.x + dir.x * radius;
            let z = position.z + dir.z * radius;
            let y = world.standing_y(x, z, position.y).unwrap_or(position.y);
            let candidate = Vec3::new(x, y, z);
            if !resolver.is_blocked(candidate) {
                return Some(candidate);
            }
        }
    }
    None
}
