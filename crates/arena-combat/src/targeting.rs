//! Weapon-specific auto-aim target selection.
//!
//! Every weapon scans the full circle around the shooter; the weapon's
//! selection policy decides which in-range candidates to lock onto.

use arena_core::constants::{CLUSTER_MIN_NEIGHBORS, CLUSTER_RADIUS};
use arena_core::enums::{SelectionPolicy, WeaponKind};
use arena_core::types::Position;
use arena_core::weapons::{config_for, TargetingProfile};

/// A potential target as seen by the targeting system.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<T> {
    pub id: T,
    pub position: Position,
    pub alive: bool,
}

/// A cluster anchored on one candidate: the anchor followed by its neighbors.
struct Cluster<T> {
    members: Vec<Candidate<T>>,
}

/// Retains the most recent lock so other systems can query it between frames.
#[derive(Debug, Clone)]
pub struct TargetingSystem<T> {
    targets: Vec<T>,
    primary_position: Option<Position>,
    aim_angle: Option<f64>,
}

impl<T> Default for TargetingSystem<T> {
    fn default() -> Self {
        Self {
            targets: Vec::new(),
            primary_position: None,
            aim_angle: None,
        }
    }
}

impl<T: Copy + PartialEq> TargetingSystem<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute the lock for `weapon` and return the primary target.
    pub fn find_target(
        &mut self,
        origin: Position,
        candidates: &[Candidate<T>],
        weapon: WeaponKind,
    ) -> Option<T> {
        let selected = select_targets(origin, candidates, weapon);

        self.targets = selected.iter().map(|c| c.id).collect();
        self.primary_position = selected.first().map(|c| c.position);
        self.aim_angle = self.primary_position.map(|p| origin.angle_to(&p));

        self.target()
    }

    /// True when the last call locked onto at least one candidate.
    pub fn has_target(&self) -> bool {
        !self.targets.is_empty()
    }

    /// Primary target of the last call.
    pub fn target(&self) -> Option<T> {
        self.targets.first().copied()
    }

    /// All locked targets of the last call, primary first.
    pub fn targets(&self) -> &[T] {
        &self.targets
    }

    /// Bearing from the shooter to the primary target at lock time.
    pub fn aim_angle(&self) -> Option<f64> {
        self.aim_angle
    }

    pub fn primary_position(&self) -> Option<Position> {
        self.primary_position
    }

    pub fn clear(&mut self) {
        self.targets.clear();
        self.primary_position = None;
        self.aim_angle = None;
    }
}

/// Select the ordered lock set for `weapon` from `candidates`.
///
/// Returns at most the profile's `max_targets` candidates, primary first.
pub fn select_targets<T: Copy + PartialEq>(
    origin: Position,
    candidates: &[Candidate<T>],
    weapon: WeaponKind,
) -> Vec<Candidate<T>> {
    let profile = &config_for(weapon).targeting;
    let in_range = filter_in_range(origin, candidates, profile);
    if in_range.is_empty() {
        return Vec::new();
    }

    match profile.policy {
        SelectionPolicy::Closest => closest(origin, in_range),
        SelectionPolicy::Furthest => furthest(origin, in_range),
        SelectionPolicy::MultiClosest => multi_closest(origin, in_range, profile.max_targets),
        SelectionPolicy::Cluster => cluster(origin, in_range),
    }
}

/// Live candidates within the lock range (inclusive).
fn filter_in_range<T: Copy>(
    origin: Position,
    candidates: &[Candidate<T>],
    profile: &TargetingProfile,
) -> Vec<Candidate<T>> {
    candidates
        .iter()
        .filter(|c| c.alive && origin.distance_to(&c.position) <= profile.effective_range)
        .copied()
        .collect()
}

/// Stable sort by distance from origin; equal distances keep input order.
fn sort_by_distance<T>(origin: Position, candidates: &mut [Candidate<T>], descending: bool) {
    candidates.sort_by(|a, b| {
        let da = origin.distance_to(&a.position);
        let db = origin.distance_to(&b.position);
        if descending {
            db.total_cmp(&da)
        } else {
            da.total_cmp(&db)
        }
    });
}

fn closest<T: Copy>(origin: Position, mut in_range: Vec<Candidate<T>>) -> Vec<Candidate<T>> {
    sort_by_distance(origin, &mut in_range, false);
    in_range.truncate(1);
    in_range
}

fn furthest<T: Copy>(origin: Position, mut in_range: Vec<Candidate<T>>) -> Vec<Candidate<T>> {
    sort_by_distance(origin, &mut in_range, true);
    in_range.truncate(1);
    in_range
}

fn multi_closest<T: Copy>(
    origin: Position,
    mut in_range: Vec<Candidate<T>>,
    max_targets: usize,
) -> Vec<Candidate<T>> {
    sort_by_distance(origin, &mut in_range, false);
    in_range.truncate(max_targets);
    in_range
}

/// Closest member of the largest cluster; closest overall when nothing clusters.
fn cluster<T: Copy + PartialEq>(
    origin: Position,
    in_range: Vec<Candidate<T>>,
) -> Vec<Candidate<T>> {
    let clusters = find_clusters(&in_range);

    // First cluster of maximal size wins ties.
    let mut best: Option<&Cluster<T>> = None;
    for c in &clusters {
        if best.map_or(true, |b| c.members.len() > b.members.len()) {
            best = Some(c);
        }
    }

    match best {
        Some(best) => {
            let mut members = best.members.clone();
            sort_by_distance(origin, &mut members, false);
            members.truncate(1);
            members
        }
        None => closest(origin, in_range),
    }
}

fn find_clusters<T: Copy + PartialEq>(in_range: &[Candidate<T>]) -> Vec<Cluster<T>> {
    let mut clusters = Vec::new();

    for anchor in in_range {
        let neighbors: Vec<Candidate<T>> = in_range
            .iter()
            .filter(|other| {
                other.id != anchor.id
                    && anchor.position.distance_to(&other.position) <= CLUSTER_RADIUS
            })
            .copied()
            .collect();

        if neighbors.len() >= CLUSTER_MIN_NEIGHBORS {
            let mut members = Vec::with_capacity(neighbors.len() + 1);
            members.push(*anchor);
            members.extend(neighbors);
            clusters.push(Cluster { members });
        }
    }

    clusters
}
