//! Street simulation validation test
//!
//! Runs the headless street with controlled arrivals and checks queueing,
//! exits, statistics and rendering.

use std::collections::HashMap;
use traffic_light_sim::simulation::{
    ArrivalModel, LightColor, Scenario, SimStreet, StreetConfig, TrafficLight, CAR_LENGTH,
    SAFE_FOLLOWING_MULTIPLIER,
};

/// 120m street with the light at 60m and no random arrivals
fn quiet_config(light: TrafficLight) -> StreetConfig {
    StreetConfig {
        road_length: 120.0,
        light_position: 60.0,
        car_speed: 20.0,
        time_step: 0.1,
        stop_buffer: 0.0,
        following_distance: CAR_LENGTH * SAFE_FOLLOWING_MULTIPLIER,
        arrivals: ArrivalModel::PerTick(0.0),
        light,
        seed: Some(1),
    }
}

fn always_green() -> TrafficLight {
    TrafficLight::two_phase(10.0, 0.0)
}

/// Green for the first second, then red for a long time
fn red_after_one_second() -> TrafficLight {
    TrafficLight::two_phase(1.0, 100.0)
}

#[test]
fn test_car_drives_through_on_green() {
    let mut street = SimStreet::new(quiet_config(always_green())).unwrap();
    assert!(street.try_spawn_car_at_entrance().is_some());

    street.run_ticks(59);
    assert_eq!(street.cars.len(), 1);

    street.run_ticks(6);
    assert!(street.cars.is_empty());

    let stats = street.stats();
    assert_eq!(stats.cars_spawned, 1);
    assert_eq!(stats.cars_exited, 1);
    assert_eq!(stats.total_stops, 0);
    assert!((stats.average_travel_time() - 6.0).abs() < 0.05);
    assert_eq!(stats.average_wait(), 0.0);
}

#[test]
fn test_car_stops_at_red_light() {
    let mut street = SimStreet::new(quiet_config(red_after_one_second())).unwrap();
    street.try_spawn_car_at_entrance();
    street.run_ticks(100);

    assert_eq!(street.light_color(), LightColor::Red);
    let positions = street.car_positions();
    assert_eq!(positions.len(), 1);
    assert!((positions[0] - 60.0).abs() < 1e-3);
    assert_eq!(street.queue_length(), 1);
    assert_eq!(street.cars_before_light(), 0);
    assert_eq!(street.stats().cars_exited, 0);
}

#[test]
fn test_stop_buffer_leaves_gap_before_line() {
    let mut config = quiet_config(red_after_one_second());
    config.stop_buffer = 2.0;
    let mut street = SimStreet::new(config).unwrap();
    street.try_spawn_car_at_entrance();
    street.run_ticks(100);

    let positions = street.car_positions();
    assert!((positions[0] - 58.0).abs() < 1e-3);
    assert_eq!(street.cars_before_light(), 1);
}

#[test]
fn test_cars_queue_behind_each_other() {
    let mut street = SimStreet::new(quiet_config(red_after_one_second())).unwrap();
    street.try_spawn_car_at_entrance();
    street.run_ticks(5);
    assert!(street.try_spawn_car_at_entrance().is_some());
    street.run_ticks(100);

    let following = CAR_LENGTH * SAFE_FOLLOWING_MULTIPLIER;
    let positions = street.car_positions();
    assert_eq!(positions.len(), 2);
    assert!((positions[0] - 60.0).abs() < 1e-3);
    assert!((positions[1] - (60.0 - following)).abs() < 1e-3);
    assert_eq!(street.queue_length(), 2);
    assert_eq!(street.stats().max_queue_length, 2);
}

#[test]
fn test_entrance_blocked_while_occupied() {
    let mut street = SimStreet::new(quiet_config(always_green())).unwrap();
    assert!(street.try_spawn_car_at_entrance().is_some());
    assert!(street.entrance_blocked());
    assert!(street.try_spawn_car_at_entrance().is_none());

    assert_eq!(street.cars.len(), 1);
    assert_eq!(street.stats().arrivals_blocked, 1);

    // Three ticks at 2m per tick clears the 6m following distance
    street.run_ticks(3);
    assert!(!street.entrance_blocked());
    assert!(street.try_spawn_car_at_entrance().is_some());
}

#[test]
fn test_zero_following_distance_lets_cars_overlap() {
    let mut config = quiet_config(red_after_one_second());
    config.following_distance = 0.0;
    let mut street = SimStreet::new(config).unwrap();

    assert!(street.try_spawn_car_at_entrance().is_some());
    assert!(street.try_spawn_car_at_entrance().is_some());
    street.run_ticks(100);

    let positions = street.car_positions();
    assert_eq!(positions.len(), 2);
    for position in positions {
        assert!((position - 60.0).abs() < 1e-3);
    }
}

#[test]
fn test_queue_discharges_when_light_turns_green() {
    let mut street = SimStreet::new(quiet_config(TrafficLight::two_phase(1.0, 5.0))).unwrap();
    street.try_spawn_car_at_entrance();
    street.run_ticks(5);
    street.try_spawn_car_at_entrance();

    street.run_ticks(200);

    let stats = street.stats();
    assert!(street.cars.is_empty());
    assert_eq!(stats.cars_exited, 2);
    assert!(stats.total_stops >= 2);
    assert!(stats.total_wait_time > 0.0);
    assert_eq!(stats.max_queue_length, 2);
}

#[test]
fn test_car_removed_on_reaching_end() {
    let config = StreetConfig {
        road_length: 10.0,
        light_position: 5.0,
        car_speed: 10.0,
        ..quiet_config(always_green())
    };
    let mut street = SimStreet::new(config).unwrap();
    street.try_spawn_car_at_entrance();

    street.run_ticks(9);
    assert_eq!(street.cars.len(), 1);
    street.run_ticks(1);
    assert!(street.cars.is_empty());
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let config = StreetConfig::from_scenario(Scenario::TwoPhase);
    let mut first = SimStreet::new(config.clone()).unwrap();
    let mut second = SimStreet::new(config).unwrap();

    first.run_ticks(300);
    second.run_ticks(300);

    assert_eq!(first.stats(), second.stats());
    assert_eq!(first.car_positions(), second.car_positions());
    assert!(first.stats().cars_spawned > 0);
}

#[test]
fn test_unseeded_scenario_runs() {
    let mut street = SimStreet::new(StreetConfig::from_scenario(Scenario::ThreePhase)).unwrap();
    let ticks = street.run_for(30.0);
    assert_eq!(ticks, 300);
    assert_eq!(street.tick_count(), 300);

    let stats = street.stats();
    assert_eq!(
        stats.cars_spawned as usize,
        stats.cars_exited as usize + street.cars.len()
    );
}

#[test]
fn test_street_invariants_hold_every_tick() {
    let config = StreetConfig::from_scenario(Scenario::TwoPhase);
    let following = config.following_distance;
    let light_position = config.light_position;
    let road_length = config.road_length;
    let mut street = SimStreet::new(config).unwrap();

    for _ in 0..1000 {
        let before: HashMap<_, _> = street.cars.iter().map(|(id, car)| (*id, car.position)).collect();
        let light_open = street.config().light.allows_passing(street.time());

        street.tick();

        let cars = street.cars_in_order();
        for pair in cars.windows(2) {
            let gap = pair[0].position - pair[1].position;
            assert!(gap >= following - 1e-3, "cars too close: gap {}", gap);
        }
        for car in &cars {
            assert!(car.position >= 0.0 && car.position < road_length);
            if let Some(previous) = before.get(&car.id) {
                assert!(car.position >= *previous, "car moved backwards");
                if !light_open && *previous < light_position {
                    assert!(car.position <= light_position + 1e-3, "car ran the red light");
                }
            }
        }
    }

    let stats = street.stats();
    assert!(stats.cars_exited > 0);
    assert_eq!(
        stats.cars_spawned as usize,
        stats.cars_exited as usize + street.cars.len()
    );
}

#[test]
fn test_config_validation() {
    let mut config = quiet_config(always_green());
    config.light_position = 120.0;
    let err = SimStreet::new(config).err().expect("stop line past the road must fail");
    assert!(format!("{:#}", err).contains("Stop line must be within the road length"));

    let mut config = quiet_config(always_green());
    config.time_step = 0.0;
    assert!(SimStreet::new(config).is_err());

    let mut config = quiet_config(always_green());
    config.car_speed = -1.0;
    assert!(SimStreet::new(config).is_err());

    let mut config = quiet_config(always_green());
    config.arrivals = ArrivalModel::PerTick(1.5);
    assert!(SimStreet::new(config).is_err());

    let mut config = quiet_config(always_green());
    config.arrivals = ArrivalModel::PerSecond(-0.5);
    assert!(SimStreet::new(config).is_err());

    let config = quiet_config(TrafficLight::new(0.0, 0.0, 0.0));
    assert!(SimStreet::new(config).is_err());

    assert!(StreetConfig::from_scenario(Scenario::TwoPhase).validate().is_ok());
    assert!(StreetConfig::from_scenario(Scenario::ThreePhase).validate().is_ok());
}

#[test]
fn test_arrival_probability() {
    assert!((ArrivalModel::PerSecond(0.25).probability(0.1) - 0.025).abs() < 1e-6);
    assert_eq!(ArrivalModel::PerSecond(20.0).probability(0.1), 1.0);
    assert_eq!(ArrivalModel::PerTick(0.35).probability(0.5), 0.35);

    assert_eq!(
        ArrivalModel::PerTick(0.35).with_rate(0.5),
        ArrivalModel::PerTick(0.5)
    );
    assert_eq!(
        ArrivalModel::PerSecond(0.25).with_rate(1.0),
        ArrivalModel::PerSecond(1.0)
    );
}

#[test]
fn test_certain_arrivals_fill_street() {
    let mut config = quiet_config(always_green());
    config.arrivals = ArrivalModel::PerTick(1.0);
    let mut street = SimStreet::new(config).unwrap();

    street.run_ticks(30);
    let stats = street.stats();
    assert!(stats.cars_spawned >= 7);
    assert!(stats.arrivals_blocked > 0);
}

#[test]
fn test_render_strip() {
    let mut street = SimStreet::new(quiet_config(always_green())).unwrap();
    street.try_spawn_car_at_entrance();

    let strip = street.render_strip(25);
    let lines: Vec<&str> = strip.lines().collect();
    assert_eq!(lines.len(), 3);

    assert_eq!(lines[0].chars().nth(12), Some('G'));
    assert_eq!(lines[1].chars().count(), 25);
    assert_eq!(lines[1].chars().next(), Some('C'));
    assert_eq!(lines[1].chars().nth(12), Some('|'));
    assert_eq!(lines[2], "Tick: 0 | Light: Green | Cars on road: 1");
}

#[test]
fn test_status_line_tracks_light() {
    let mut street = SimStreet::new(quiet_config(red_after_one_second())).unwrap();
    street.run_ticks(20);
    assert_eq!(street.status_line(), "Tick: 20 | Light: Red | Cars on road: 0");
}

/// At a phase boundary the status line already shows the color for the next tick
#[test]
fn test_status_line_at_phase_boundary() {
    let mut street = SimStreet::new(quiet_config(red_after_one_second())).unwrap();
    street.try_spawn_car_at_entrance();

    street.run_ticks(9);
    assert_eq!(street.status_line(), "Tick: 9 | Light: Green | Cars on road: 1");

    // The tenth tick still runs on green, then the clock reaches red
    street.run_ticks(1);
    let positions = street.car_positions();
    assert!((positions[0] - 20.0).abs() < 1e-3);
    assert_eq!(street.queue_length(), 0);
    assert_eq!(street.status_line(), "Tick: 10 | Light: Red | Cars on road: 1");

    // Red only caps movement at the line, so the car keeps approaching it
    street.run_ticks(1);
    assert!((street.car_positions()[0] - 22.0).abs() < 1e-3);
}

#[test]
fn test_frame_snapshot() {
    let mut street = SimStreet::new(quiet_config(red_after_one_second())).unwrap();
    street.try_spawn_car_at_entrance();
    street.run_ticks(50);

    let frame = street.frame();
    assert_eq!(frame.tick, 50);
    assert_eq!(frame.light, street.light_color());
    assert_eq!(frame.cars.len(), 1);
    assert!((frame.cars[0].1 - 60.0).abs() < 1e-3);
    assert_eq!(frame.queue_length, 1);
    assert!(frame.time_until_change > 0.0);
}
