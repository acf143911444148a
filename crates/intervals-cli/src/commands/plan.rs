use clap::Args;
use intervals_core::{Config, Plan};

use super::IntervalArgs;

#[derive(Args, Debug)]
pub struct PlanArgs {
    #[command(flatten)]
    pub interval: IntervalArgs,
    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: PlanArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let settings = args.interval.resolve(&config);
    let plan = Plan::from_settings(&settings);

    if args.json {
        let out = serde_json::json!({
            "settings": settings,
            "steps": plan.steps(),
            "total_secs": plan.total_seconds(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    for (i, (phase, secs)) in plan.iter().enumerate() {
        println!("{:>2}. {:<4} {secs}s", i + 1, phase.as_str());
    }
    println!("Total: {}s", plan.total_seconds());
    Ok(())
}
