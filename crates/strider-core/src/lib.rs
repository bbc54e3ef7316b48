//! Strider Core - Foundational types for the Strider locomotion core
//!
//! This crate provides the types that all other Strider crates depend on:
//! - `NodeId` - Scene node identifiers
//! - `Aabb`, `Ray`, `RayHit` - World-space geometry and intersection tests
//! - Error types and Result alias

mod error;
mod geometry;
mod id;

pub use error::{Result, StriderError};
pub use geometry::{ray_aabb, ray_triangle, Aabb, Ray, RayHit};
pub use id::NodeId;

/// Re-exported math types used across the workspace
pub use glam::{Mat4, Quat, Vec2, Vec3};
