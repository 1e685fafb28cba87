//! Collision detection for rectangles
//!
//! Provides AABB overlap tests and the pair filter used to decide which
//! bodies push each other and which merely report contact.

use crate::shapes::Aabb2D;
use runner_math::Vec2;

/// Decides, per pair of body tags, whether the bodies interact
///
/// The two questions are independent: a pair can report contact without
/// pushing each other apart (a pickup), or push without reporting.
pub trait PairFilter<T> {
    /// Whether the pair is separated by collision resolution
    fn should_collide(&self, a: &T, b: &T) -> bool;

    /// Whether a began-contact event is reported for the pair
    fn should_report(&self, a: &T, b: &T) -> bool;
}

/// Filter that collides and reports every pair
#[derive(Clone, Copy, Debug, Default)]
pub struct AcceptAll;

impl<T> PairFilter<T> for AcceptAll {
    fn should_collide(&self, _a: &T, _b: &T) -> bool {
        true
    }

    fn should_report(&self, _a: &T, _b: &T) -> bool {
        true
    }
}

/// Contact information from a collision
#[derive(Clone, Copy, Debug)]
pub struct Contact {
    /// Point of contact (center of the overlap region)
    pub point: Vec2,
    /// Normal pointing from the second shape toward the first
    pub normal: Vec2,
    /// Penetration depth (positive means overlapping, zero means touching)
    pub penetration: f32,
}

impl Contact {
    /// Create a new contact
    pub fn new(point: Vec2, normal: Vec2, penetration: f32) -> Self {
        Self {
            point,
            normal,
            penetration,
        }
    }

    /// Check if this represents an actual collision (positive penetration)
    pub fn is_colliding(&self) -> bool {
        self.penetration > 0.0
    }
}

/// Test AABB vs AABB collision
///
/// Returns a contact if the AABBs are intersecting or touching. The normal
/// is along the axis of least overlap and points from `b` toward `a`.
pub fn aabb_vs_aabb(a: &Aabb2D, b: &Aabb2D) -> Option<Contact> {
    // Check for separation on each axis
    if a.max.x < b.min.x || a.min.x > b.max.x {
        return None;
    }
    if a.max.y < b.min.y || a.min.y > b.max.y {
        return None;
    }

    let overlap_min = a.min.max_components(b.min);
    let overlap_max = a.max.min_components(b.max);
    let overlap_x = (overlap_max.x - overlap_min.x).max(0.0);
    let overlap_y = (overlap_max.y - overlap_min.y).max(0.0);

    let (penetration, normal) = if overlap_y < overlap_x {
        let normal = if a.center().y < b.center().y {
            -Vec2::Y
        } else {
            Vec2::Y
        };
        (overlap_y, normal)
    } else {
        let normal = if a.center().x < b.center().x {
            -Vec2::X
        } else {
            Vec2::X
        };
        (overlap_x, normal)
    };

    let point = (overlap_min + overlap_max) * 0.5;
    Some(Contact::new(point, normal, penetration))
}
