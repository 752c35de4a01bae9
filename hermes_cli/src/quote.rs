use clap::Args;
use hermes_pooling::{
    fare::{DeliveryType, TimeContext, VehicleType, quote},
    units::Kilometers,
};
use jiff::{Zoned, civil::Time};

use crate::parsers;

#[derive(Args)]
pub struct QuoteArgs {
    /// Trip distance in kilometers
    #[arg(long)]
    distance: f64,

    #[arg(long, default_value_t = 0.0)]
    weight: f64,

    #[arg(long, value_parser = parse_vehicle, default_value = "bike")]
    vehicle: VehicleType,

    #[arg(long, value_parser = parse_delivery, default_value = "standard")]
    delivery: DeliveryType,

    /// Local time of the booking, defaults to now
    #[arg(long, value_parser = parsers::parse_time)]
    at: Option<Time>,
}

fn parse_vehicle(input: &str) -> Result<VehicleType, String> {
    serde_json::from_value(serde_json::Value::String(input.to_lowercase()))
        .map_err(|_| format!("Unknown vehicle type: {input}"))
}

fn parse_delivery(input: &str) -> Result<DeliveryType, String> {
    serde_json::from_value(serde_json::Value::String(input.to_lowercase()))
        .map_err(|_| format!("Unknown delivery type: {input}"))
}

pub fn run(args: QuoteArgs) -> anyhow::Result<()> {
    let at = args.at.unwrap_or_else(|| Zoned::now().time());
    let fare = quote(
        Kilometers::new(args.distance),
        args.weight,
        args.vehicle,
        args.delivery,
        TimeContext::at(at),
    );

    println!("{}", serde_json::to_string_pretty(&fare)?);

    Ok(())
}
