//! Compatibility of a candidate request with the members of an existing pool.
//!
//! The score is directional: it measures how well the candidate fits the
//! current members, and `score(pool, x)` says nothing about how a pool made
//! of `x` would rate someone else.

use crate::{
    geometry::{angular_difference, bearing, distance},
    params::PoolingParams,
    request::{Place, Request},
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MemberScore {
    pub pickup: f64,
    pub dropoff: f64,
    pub direction: f64,
    pub composite: f64,
}

fn proximity(a: &Place, b: &Place, params: &PoolingParams) -> f64 {
    (1.0 - distance(a.point(), b.point()) / params.proximity_radius_km).max(0.0)
}

fn heading(request: &Request) -> f64 {
    bearing(request.pickup().point(), request.dropoff().point())
}

pub fn score_member(member: &Request, candidate: &Request, params: &PoolingParams) -> MemberScore {
    let pickup = proximity(member.pickup(), candidate.pickup(), params);
    let dropoff = proximity(member.dropoff(), candidate.dropoff(), params);

    let divergence = angular_difference(heading(member), heading(candidate));
    let direction = (1.0 - divergence / params.max_direction_divergence_deg).max(0.0);

    let weights = &params.score_weights;
    MemberScore {
        pickup,
        dropoff,
        direction,
        composite: weights.pickup * pickup + weights.dropoff * dropoff + weights.direction * direction,
    }
}

/// Mean composite score of `candidate` against every member.
///
/// Returns `None` for an empty member list; pools are never empty so the
/// engine never observes it.
pub fn score(members: &[Request], candidate: &Request, params: &PoolingParams) -> Option<f64> {
    if members.is_empty() {
        return None;
    }

    let total: f64 = members
        .iter()
        .map(|member| score_member(member, candidate, params).composite)
        .sum();

    Some(total / members.len() as f64)
}
