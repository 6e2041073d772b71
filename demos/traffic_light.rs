//! A traffic light, a cyclist and a police car.
//!
//! Run with `RUST_LOG=debug cargo run --example traffic_light` to see blocked
//! guards and deliveries.

use statecast::state_enum;
use statecast::{
    broadcast_action, simple_action, ActionBuilder, MachineTypeBuilder, ReactionBuilder, Runtime,
    Transition,
};
use tracing_subscriber::EnvFilter;

state_enum! {
    enum TrafficLight {
        Green,
        Yellow,
        Red,
    }
}

state_enum! {
    enum Cyclist {
        Cycling,
        Stopped,
    }
}

state_enum! {
    enum PoliceCar {
        Rolling,
        Stopped,
        Chasing,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let traffic_light = MachineTypeBuilder::new("traffic_light")
        .transitions([
            Transition::new(TrafficLight::Green, TrafficLight::Yellow),
            Transition::new(TrafficLight::Yellow, TrafficLight::Red),
            Transition::new(TrafficLight::Red, TrafficLight::Green),
        ])
        .action(broadcast_action("green", TrafficLight::Green))?
        .action(broadcast_action("yellow", TrafficLight::Yellow))?
        .action(broadcast_action("red", TrafficLight::Red))?
        .build();

    let cyclist = MachineTypeBuilder::new("cyclist")
        .transitions([
            Transition::new(Cyclist::Stopped, Cyclist::Cycling),
            Transition::new(Cyclist::Cycling, Cyclist::Stopped),
        ])
        .action(
            ActionBuilder::new("cycle_fast")
                .to(Cyclist::Cycling)
                .when(TrafficLight::Green)
                .when(TrafficLight::Yellow)
                .unless(PoliceCar::Chasing),
        )?
        .action(
            ActionBuilder::new("cycle_slow")
                .to(Cyclist::Cycling)
                .when(TrafficLight::Green)
                .unless(PoliceCar::Chasing),
        )?
        .action(simple_action("stop", Cyclist::Stopped))?
        .reaction(
            ReactionBuilder::new("on_green_light")
                .on(TrafficLight::Green)
                .run(|reactor, _| reactor.act("cycle_slow")),
        )?
        .reaction(
            ReactionBuilder::new("on_red_light")
                .on(TrafficLight::Red)
                .run(|reactor, _| reactor.act("stop")),
        )?
        .reaction(
            ReactionBuilder::new("on_being_chased")
                .on(PoliceCar::Chasing)
                .run(|reactor, _| reactor.act("stop")),
        )?
        .build();

    let police_car = MachineTypeBuilder::new("police_car")
        .transitions([
            Transition::bidirectional(PoliceCar::Rolling, PoliceCar::Stopped),
            Transition::bidirectional(PoliceCar::Rolling, PoliceCar::Chasing),
            Transition::bidirectional(PoliceCar::Stopped, PoliceCar::Chasing),
        ])
        .action(broadcast_action("chase", PoliceCar::Chasing))?
        .action(broadcast_action("roll", PoliceCar::Rolling))?
        .action(simple_action("stop", PoliceCar::Stopped))?
        .reaction(
            ReactionBuilder::new("on_green_light")
                .on(TrafficLight::Green)
                .unless(PoliceCar::Chasing)
                .run(|reactor, _| reactor.act("roll")),
        )?
        .reaction(
            ReactionBuilder::new("on_red_light")
                .on(TrafficLight::Red)
                .unless(PoliceCar::Chasing)
                .run(|reactor, _| reactor.act("stop")),
        )?
        .build();

    let mut runtime = Runtime::new();
    let light = runtime.spawn(&traffic_light, TrafficLight::Yellow);
    let rider = runtime.spawn(&cyclist, Cyclist::Cycling);
    let police = runtime.spawn(&police_car, PoliceCar::Rolling);

    runtime.subscribe(rider, &[light.id()])?;
    runtime.subscribe(police, &[light.id()])?;
    runtime.register(police, &[rider.id()])?;

    runtime.act(light, "red")?;
    runtime.act(light, "green")?;
    runtime.act(light, "yellow")?;

    for machine in runtime.machines() {
        println!("{machine}: {} ({} events)", machine.state(), machine.events().len());
    }
    Ok(())
}
