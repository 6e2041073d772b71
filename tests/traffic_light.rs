//! A traffic light publishing to a cyclist and a police car, with the
//! police car publishing to the cyclist.

use statecast::state_enum;
use statecast::{
    broadcast_action, simple_action, ActionBuilder, AnyState, Handle, MachineType,
    MachineTypeBuilder, ReactionBuilder, Runtime, Transition,
};

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

fn traffic_light() -> MachineType<TrafficLight> {
    MachineTypeBuilder::new("traffic_light")
        .transitions([
            Transition::new(TrafficLight::Green, TrafficLight::Yellow),
            Transition::new(TrafficLight::Yellow, TrafficLight::Red),
            Transition::new(TrafficLight::Red, TrafficLight::Green),
        ])
        .action(broadcast_action("green", TrafficLight::Green))
        .and_then(|b| b.action(broadcast_action("yellow", TrafficLight::Yellow)))
        .and_then(|b| b.action(broadcast_action("red", TrafficLight::Red)))
        .unwrap()
        .build()
}

fn cyclist() -> MachineType<Cyclist> {
    MachineTypeBuilder::new("cyclist")
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
        )
        .and_then(|b| {
            b.action(
                ActionBuilder::new("cycle_slow")
                    .to(Cyclist::Cycling)
                    .when(TrafficLight::Green)
                    .unless(PoliceCar::Chasing),
            )
        })
        .and_then(|b| b.action(simple_action("stop", Cyclist::Stopped)))
        .and_then(|b| {
            b.reaction(
                ReactionBuilder::new("on_green_light")
                    .on(TrafficLight::Green)
                    .run(|reactor, _| reactor.act("cycle_slow")),
            )
        })
        .and_then(|b| {
            b.reaction(
                ReactionBuilder::new("on_red_light")
                    .on(TrafficLight::Red)
                    .run(|reactor, _| reactor.act("stop")),
            )
        })
        .and_then(|b| {
            b.reaction(
                ReactionBuilder::new("on_being_chased")
                    .on(PoliceCar::Chasing)
                    .run(|reactor, _| reactor.act("stop")),
            )
        })
        .unwrap()
        .build()
}

fn police_car() -> MachineType<PoliceCar> {
    MachineTypeBuilder::new("police_car")
        .transitions([
            Transition::bidirectional(PoliceCar::Rolling, PoliceCar::Stopped),
            Transition::bidirectional(PoliceCar::Rolling, PoliceCar::Chasing),
            Transition::bidirectional(PoliceCar::Stopped, PoliceCar::Chasing),
        ])
        .action(broadcast_action("chase", PoliceCar::Chasing))
        .and_then(|b| b.action(broadcast_action("roll", PoliceCar::Rolling)))
        .and_then(|b| b.action(simple_action("stop", PoliceCar::Stopped)))
        .and_then(|b| {
            b.reaction(
                ReactionBuilder::new("on_green_light")
                    .on(TrafficLight::Green)
                    .unless(PoliceCar::Chasing)
                    .run(|reactor, _| reactor.act("roll")),
            )
        })
        .and_then(|b| {
            b.reaction(
                ReactionBuilder::new("on_red_light")
                    .on(TrafficLight::Red)
                    .unless(PoliceCar::Chasing)
                    .run(|reactor, _| reactor.act("stop")),
            )
        })
        .unwrap()
        .build()
}

struct Street {
    runtime: Runtime,
    light: Handle<TrafficLight>,
    cyclist: Handle<Cyclist>,
    police: Handle<PoliceCar>,
}

fn street() -> Street {
    let mut runtime = Runtime::new();
    let light = runtime.spawn(&traffic_light(), TrafficLight::Yellow);
    let cyclist = runtime.spawn(&cyclist(), Cyclist::Cycling);
    let police = runtime.spawn(&police_car(), PoliceCar::Rolling);

    runtime.subscribe(cyclist, &[light.id()]).unwrap();
    runtime.subscribe(police, &[light.id()]).unwrap();
    runtime.register(police, &[cyclist.id()]).unwrap();

    Street {
        runtime,
        light,
        cyclist,
        police,
    }
}

#[test]
fn wiring_snapshots_the_light() {
    let street = street();
    let cyclist = street.runtime.machine(street.cyclist).unwrap();

    assert_eq!(
        cyclist.publisher_state(street.light.id()),
        Some(AnyState::of(TrafficLight::Yellow))
    );
    // register does not snapshot
    assert_eq!(cyclist.publisher_state(street.police.id()), None);

    let light = street.runtime.machine(street.light).unwrap();
    assert_eq!(
        light.consumers().iter().copied().collect::<Vec<_>>(),
        vec![street.cyclist.id(), street.police.id()]
    );
}

#[test]
fn light_cycle_stops_and_restarts_everyone() {
    let mut street = street();

    street.runtime.act(street.light, "red").unwrap();
    assert_eq!(street.runtime.state(street.cyclist), Some(Cyclist::Stopped));
    assert_eq!(street.runtime.state(street.police), Some(PoliceCar::Stopped));

    street.runtime.act(street.light, "green").unwrap();
    assert_eq!(street.runtime.state(street.cyclist), Some(Cyclist::Cycling));
    assert_eq!(street.runtime.state(street.police), Some(PoliceCar::Rolling));

    street.runtime.act(street.light, "yellow").unwrap();
    assert_eq!(street.runtime.state(street.light), Some(TrafficLight::Yellow));
    assert_eq!(street.runtime.state(street.cyclist), Some(Cyclist::Cycling));
    assert_eq!(street.runtime.state(street.police), Some(PoliceCar::Rolling));
}

#[test]
fn police_roll_reaches_cyclist_through_registration() {
    let mut street = street();
    street.runtime.act(street.light, "red").unwrap();
    street.runtime.act(street.light, "green").unwrap();

    let cyclist = street.runtime.machine(street.cyclist).unwrap();
    assert_eq!(
        cyclist.publisher_state(street.police.id()),
        Some(AnyState::of(PoliceCar::Rolling))
    );

    assert_eq!(
        cyclist.events().names(),
        vec!["red", "stop", "green", "cycle_slow", "roll"]
    );
}

#[test]
fn chase_keeps_cyclist_stopped_through_green() {
    let mut street = street();

    street.runtime.act(street.light, "red").unwrap();
    street.runtime.act(street.police, "chase").unwrap();
    assert_eq!(street.runtime.state(street.police), Some(PoliceCar::Chasing));
    assert_eq!(street.runtime.state(street.cyclist), Some(Cyclist::Stopped));

    street.runtime.act(street.light, "green").unwrap();
    assert_eq!(street.runtime.state(street.cyclist), Some(Cyclist::Stopped));
    assert_eq!(street.runtime.state(street.police), Some(PoliceCar::Chasing));

    // cycle_slow was blocked before it could be logged
    let names = street.runtime.events(street.cyclist).unwrap().names();
    assert!(!names.contains(&"cycle_slow"));
}

#[test]
fn cycle_fast_needs_a_green_or_yellow_light() {
    let mut street = street();

    street.runtime.act(street.light, "red").unwrap();
    street.runtime.act(street.cyclist, "cycle_fast").unwrap();
    assert_eq!(street.runtime.state(street.cyclist), Some(Cyclist::Stopped));

    street.runtime.act(street.light, "green").unwrap();
    street.runtime.act(street.cyclist, "stop").unwrap();
    street.runtime.act(street.cyclist, "cycle_fast").unwrap();
    assert_eq!(street.runtime.state(street.cyclist), Some(Cyclist::Cycling));
}

#[test]
fn cyclist_and_police_stopped_are_different_states() {
    let mut street = street();
    street.runtime.act(street.light, "red").unwrap();

    let cyclist = street.runtime.state_of(street.cyclist).unwrap();
    let police = street.runtime.state_of(street.police).unwrap();
    assert_eq!(cyclist.name(), police.name());
    assert_ne!(cyclist, police);
}

#[test]
fn skipping_yellow_is_rejected() {
    let mut street = street();
    street.runtime.act(street.light, "red").unwrap();
    street.runtime.act(street.light, "green").unwrap();

    let err = street.runtime.act(street.light, "red").unwrap_err();
    let transition = err.as_transition().unwrap();
    assert_eq!(transition.machine, "traffic_light#0");
    assert_eq!(transition.from, AnyState::of(TrafficLight::Green));
    assert_eq!(street.runtime.state(street.light), Some(TrafficLight::Green));
}
