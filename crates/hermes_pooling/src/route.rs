//! Visiting order for the stops of a pool.
//!
//! Greedy, not a TSP solver: pickups are visited first in creation order,
//! then dropoffs by repeated nearest neighbor from the last pickup.

use crate::{geometry::distance, pool::Stop, request::Request};

pub fn optimize(requests: &[Request]) -> Vec<Stop> {
    match requests {
        [] => Vec::new(),
        [single] => vec![Stop::pickup(single), Stop::dropoff(single)],
        _ => {
            let mut pickups: Vec<&Request> = requests.iter().collect();
            // Stable: requests created at the same instant keep membership order.
            pickups.sort_by_key(|request| request.created_at());

            let mut route: Vec<Stop> = pickups.iter().map(|r| Stop::pickup(r)).collect();

            let mut current = route[route.len() - 1].point();
            let mut remaining: Vec<&Request> = requests.iter().collect();

            while let Some(index) = nearest_dropoff(current, &remaining) {
                let request = remaining.remove(index);
                current = request.dropoff().point();
                route.push(Stop::dropoff(request));
            }

            route
        }
    }
}

/// Index of the dropoff closest to `from`. The first one wins on ties.
fn nearest_dropoff(from: geo::Point, candidates: &[&Request]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;

    for (index, request) in candidates.iter().enumerate() {
        let d = distance(from, request.dropoff().point()).value();
        match best {
            Some((_, best_distance)) if d >= best_distance => {}
            _ => best = Some((index, d)),
        }
    }

    best.map(|(index, _)| index)
}
