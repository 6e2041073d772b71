//! Water and gold changing phase.
//!
//! Run with `RUST_LOG=trace cargo run --example elements` to also see no-op
//! transitions.

use serde_json::json;
use statecast::state_enum;
use statecast::{simple_action, Meta, MachineTypeBuilder, Runtime, Transition};
use tracing_subscriber::EnvFilter;

state_enum! {
    enum Substance {
        Gas,
        Liquid,
        Solid,
        Plasma,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let water = MachineTypeBuilder::new("water")
        .transitions([
            Transition::bidirectional(Substance::Gas, Substance::Liquid),
            Transition::bidirectional(Substance::Liquid, Substance::Solid),
            Transition::new(Substance::Liquid, Substance::Plasma),
        ])
        .action(simple_action("boil", Substance::Gas))?
        .action(simple_action("melt", Substance::Liquid))?
        .action(simple_action("freeze", Substance::Solid))?
        .action(simple_action("electrolyze", Substance::Plasma))?
        .build();

    let gold = MachineTypeBuilder::new("gold")
        .transition(Transition::bidirectional(Substance::Liquid, Substance::Solid))
        .action(simple_action("melt", Substance::Liquid))?
        .action(simple_action("freeze", Substance::Solid))?
        .build();

    let mut runtime = Runtime::new();
    let glass = runtime.spawn(&water, Substance::Liquid);
    let bar = runtime.spawn(&gold, Substance::Solid);

    let mut meta = Meta::new();
    meta.insert("msg".to_string(), json!("Freezing water"));
    runtime.act_with(glass, "freeze", meta)?;
    runtime.act(glass, "melt")?;
    runtime.act(glass, "boil")?;

    runtime.act(bar, "freeze")?;
    runtime.act(bar, "melt")?;

    if let Some(log) = runtime.events(glass) {
        println!("{}", log.to_json()?);
    }
    Ok(())
}
