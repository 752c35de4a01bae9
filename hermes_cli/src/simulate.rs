use std::{fs::File, io::BufReader, path::PathBuf};

use clap::Args;
use comfy_table::Table;
use hermes_pooling::{
    engine::{PoolingEngine, PoolingStatistics},
    events::{LifecycleEvent, PoolEvent},
    params::PoolingParams,
    pool::Pool,
};
use serde::Serialize;
use tracing::{info, warn};

#[derive(Args)]
pub struct SimulateArgs {
    /// JSON array of lifecycle events to replay
    #[arg(short = 'i', long)]
    input: PathBuf,

    /// Engine parameters, defaults are used for missing fields
    #[arg(short, long)]
    params: Option<PathBuf>,

    /// Where to write the resulting pools as JSON
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Serialize)]
struct SimulationOutput<'a> {
    pools: Vec<&'a Pool>,
    statistics: PoolingStatistics,
}

pub fn run(args: SimulateArgs) -> anyhow::Result<()> {
    let params = match &args.params {
        Some(path) => PoolingParams::from_json_file(path)?,
        None => PoolingParams::default(),
    };

    let f = File::open(&args.input)?;
    let events: Vec<LifecycleEvent> = serde_json::from_reader(BufReader::new(f))?;
    info!(events = events.len(), input = %args.input.display(), "Replaying lifecycle events");

    let mut engine = PoolingEngine::new(params);
    let mut pool_events = engine.subscribe();

    for event in events {
        if let Err(error) = engine.handle(event) {
            warn!(%error, "Lifecycle event rejected");
        }

        while let Ok(event) = pool_events.try_recv() {
            log_pool_event(&event);
        }
    }

    let pools = engine.list_active_pools();
    println!("{}", summary_table(&pools));

    let statistics = engine.statistics();
    info!(
        pools = statistics.active_pools,
        requests = statistics.active_requests,
        joins = statistics.joins,
        "Simulation finished"
    );

    if let Some(output) = args.output {
        if let Some(parent) = output.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = File::create(&output)?;
        serde_json::to_writer_pretty(file, &SimulationOutput { pools, statistics })?;
        info!(output = %output.display(), "Wrote pools");
    }

    Ok(())
}

fn log_pool_event(event: &PoolEvent) {
    match event {
        PoolEvent::PoolUpdated(pool) => info!(
            pool_id = %pool.id(),
            members = pool.member_count(),
            distance = %pool.total_distance(),
            cost_per_customer = pool.cost_per_customer(),
            "pool_updated"
        ),
        PoolEvent::PoolDeleted {
            pool_id,
            request_id,
        } => info!(%pool_id, %request_id, "pool_deleted"),
    }
}

fn summary_table(pools: &[&Pool]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        "Pool",
        "Requests",
        "Distance",
        "Time",
        "Cost / customer",
        "Savings",
    ]);

    for pool in pools {
        let requests = pool
            .members()
            .iter()
            .map(|member| member.id().as_str())
            .collect::<Vec<_>>()
            .join(", ");

        table.add_row(vec![
            pool.id().to_string(),
            requests,
            pool.total_distance().to_string(),
            format!("{:#}", pool.estimated_time()),
            format!("{:.2}", pool.cost_per_customer()),
            format!("{:.2}", pool.savings()),
        ]);
    }

    table
}
