//! Pseudo-random, non-overlapping placement inside the vessel interior.

use std::f32::consts::TAU;

use crate::config::VisualConfig;
use crate::env::{RngOracle, VisualGeometry, compute_seed};
use crate::host::VisualAnchor;
use crate::state::{ItemId, Vec3};

/// Where and how large a visual entry is placed, in interior-local space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub local_position: Vec3,
    pub local_scale: f32,
    /// Horizontal radius the entry occupies once scaled.
    pub footprint: f32,
    /// Offset that re-centers the item mesh on its bounds.
    pub mesh_offset: Vec3,
}

/// Horizontal ellipse that placements are drawn from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct PlacementArea {
    half_x: f32,
    half_z: f32,
    height: f32,
}

impl PlacementArea {
    pub(super) fn new(anchor: &VisualAnchor, config: &VisualConfig) -> Self {
        let usable = anchor.interior_scale.scaled(config.radius_factor);
        Self {
            half_x: usable.x * 0.5,
            half_z: usable.z * 0.5,
            height: config.item_height,
        }
    }
}

/// Chooses a position for a new visual entry.
///
/// Candidates are drawn uniformly from the interior disc shrunk by the item's
/// footprint. The first candidate that overlaps no existing footprint wins;
/// if every attempt overlaps, the one with the most clearance is used.
pub(super) fn place<R>(
    area: &PlacementArea,
    geometry: &VisualGeometry,
    config: &VisualConfig,
    occupied: &[Placement],
    rng: &R,
    seed: u64,
    item: ItemId,
) -> Placement
where
    R: RngOracle + ?Sized,
{
    let footprint = geometry.planar_radius() * config.item_scale;
    let radius_x = (area.half_x - footprint).max(0.0);
    let radius_z = (area.half_z - footprint).max(0.0);

    let mut best: Option<(f32, Vec3)> = None;
    for attempt in 0..config.placement_attempts.max(1) {
        let context = attempt * 2;
        let radius = rng.unit_f32(compute_seed(seed, 0, item.0, context)).sqrt();
        let angle = rng.unit_f32(compute_seed(seed, 0, item.0, context + 1)) * TAU;
        let candidate = Vec3::new(
            radius * angle.cos() * radius_x,
            area.height,
            radius * angle.sin() * radius_z,
        );

        let clearance = occupied
            .iter()
            .map(|other| candidate.planar_distance(other.local_position) - other.footprint - footprint)
            .fold(f32::INFINITY, f32::min);

        if clearance >= 0.0 {
            best = Some((clearance, candidate));
            break;
        }
        if best.is_none_or(|(best_clearance, _)| clearance > best_clearance) {
            best = Some((clearance, candidate));
        }
    }

    let local_position = best.map_or(Vec3::new(0.0, area.height, 0.0), |(_, position)| position);
    Placement {
        local_position,
        local_scale: config.item_scale,
        footprint,
        mesh_offset: geometry.center_offset.scaled(-1.0),
    }
}
