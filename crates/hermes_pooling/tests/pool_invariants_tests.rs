mod test_utils;

use hermes_pooling::{
    engine::{PoolingEngine, recompute},
    request::{Request, RequestId},
    route::optimize,
    scoring::score,
};
use rand::{Rng, SeedableRng, rngs::StdRng};
use test_utils::{MUMBAI_PICKUP, create_request, destination};

/// Requests scattered within a few km of central Mumbai, heading in a
/// narrow cone so that many of them pool together.
fn random_requests(rng: &mut StdRng, count: usize) -> Vec<Request> {
    (0..count)
        .map(|i| {
            let pickup = destination(
                MUMBAI_PICKUP,
                rng.random_range(0.0..360.0),
                rng.random_range(0.0..2.0),
            );
            let dropoff = destination(
                pickup,
                rng.random_range(300.0..360.0),
                rng.random_range(0.5..6.0),
            );
            create_request(&format!("r{i}"), pickup, dropoff, i as i64)
        })
        .collect()
}

fn assert_invariants(engine: &PoolingEngine) {
    let params = engine.params();
    for pool in engine.list_active_pools() {
        let count = pool.member_count();
        assert!(
            (1..=params.max_pool_size).contains(&count),
            "pool {} has {count} members",
            pool.id()
        );

        assert_eq!(
            pool.metrics(),
            &recompute(pool.members(), params),
            "stale metrics in pool {}",
            pool.id()
        );

        if count == 1 {
            assert_eq!(pool.savings(), 0.0);
        }

        assert_eq!(pool.route().len(), 2 * count);
        for member in pool.members() {
            assert_eq!(engine.pool_of(member.id()), Some(pool.id()));
        }
    }
}

#[test]
fn test_invariants_hold_through_intake_and_removal() {
    let mut rng = StdRng::seed_from_u64(42);
    let requests = random_requests(&mut rng, 60);
    let mut engine = PoolingEngine::default();

    for request in &requests {
        engine.add_request(request.clone()).unwrap();
        assert_invariants(&engine);
    }

    let statistics = engine.statistics();
    assert_eq!(statistics.active_requests, requests.len());
    assert!(statistics.joins > 0, "expected some pooling");

    for i in (0..requests.len()).step_by(3) {
        engine.remove_request(&RequestId::new(format!("r{i}")));
        assert_invariants(&engine);
    }

    for request in &requests {
        engine.remove_request(request.id());
        assert_invariants(&engine);
    }

    assert!(engine.list_active_pools().is_empty());
    assert_eq!(engine.statistics().active_requests, 0);
}

#[test]
fn test_score_bounded() {
    let mut rng = StdRng::seed_from_u64(7);
    let requests = random_requests(&mut rng, 40);
    let mut engine = PoolingEngine::default();

    for request in &requests {
        for pool in engine.list_active_pools() {
            let s = score(pool.members(), request, engine.params()).unwrap();
            assert!((0.0..=1.0).contains(&s), "score {s} out of bounds");
        }
        engine.add_request(request.clone()).unwrap();
    }
}

#[test]
fn test_route_determinism() {
    let mut rng = StdRng::seed_from_u64(3);
    let requests = random_requests(&mut rng, 3);

    let first = optimize(&requests);
    for _ in 0..20 {
        assert_eq!(optimize(&requests), first);
    }
}

#[test]
fn test_same_input_same_pools() {
    let mut rng = StdRng::seed_from_u64(11);
    let requests = random_requests(&mut rng, 30);

    let run = || {
        let mut engine = PoolingEngine::default();
        for request in &requests {
            engine.add_request(request.clone()).unwrap();
        }
        engine
            .list_active_pools()
            .iter()
            .map(|pool| {
                pool.members()
                    .iter()
                    .map(|member| member.id().clone())
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>()
    };

    assert_eq!(run(), run());
}

#[test]
fn test_isolated_request_keeps_direct_route() {
    let mut engine = PoolingEngine::default();
    let lone = create_request("lone", (28.6139, 77.2090), (28.7041, 77.1025), 0);
    let pool_id = engine.add_request(lone.clone()).unwrap();

    let pool = engine.get_pool(pool_id).unwrap();
    assert_eq!(pool.metrics(), &recompute(&[lone], engine.params()));
}
