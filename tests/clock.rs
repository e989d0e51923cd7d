use sky_viewer::sim::clock::{ManualWallClock, SimulationClock};

fn clock_at(sim_ms: f64) -> SimulationClock<ManualWallClock> {
    SimulationClock::starting_at(ManualWallClock::new(0.0), sim_ms, 0.0)
}

#[test]
fn unpaused_tick_advances_by_dt_times_speed() {
    let mut clock = clock_at(1_000.0);
    clock.set_speed(60.0);
    let frame = clock.tick(500.0);
    assert_eq!(frame.dt_real_s, 0.5);
    assert_eq!(frame.sim_time_ms, 1_000.0 + 0.5 * 1_000.0 * 60.0);
    assert_eq!(clock.sim_time_ms(), frame.sim_time_ms);
}

#[test]
fn hour_per_second_preset_adds_an_hour_per_real_second() {
    let mut clock = clock_at(0.0);
    clock.set_speed(3_600.0);
    clock.tick(1_000.0);
    assert_eq!(clock.sim_time_ms(), 3_600.0 * 1_000.0);
}

#[test]
fn paused_clock_reports_dt_but_holds_time() {
    let mut clock = clock_at(42.0);
    clock.set_speed(86_400.0);
    clock.set_paused(true);
    let frame = clock.tick(2_000.0);
    assert_eq!(frame.dt_real_s, 2.0);
    assert_eq!(frame.sim_time_ms, 42.0);
    assert!(!clock.advances());
}

#[test]
fn zero_speed_holds_time() {
    let mut clock = clock_at(42.0);
    clock.set_speed(0.0);
    clock.tick(10_000.0);
    assert_eq!(clock.sim_time_ms(), 42.0);
}

#[test]
fn wall_clock_going_backwards_yields_zero_dt() {
    let mut clock = clock_at(0.0);
    clock.tick(5_000.0);
    let before = clock.sim_time_ms();
    let frame = clock.tick(4_000.0);
    assert_eq!(frame.dt_real_s, 0.0);
    assert_eq!(clock.sim_time_ms(), before);
    assert_eq!(clock.last_wall_ms(), 5_000.0);

    // The anchor did not move back, so only the time past 5 s counts.
    clock.tick(6_000.0);
    assert_eq!(clock.sim_time_ms(), before + 1_000.0);
}

#[test]
fn reset_now_jumps_to_wall_time_even_when_paused() {
    let mut clock = clock_at(0.0);
    clock.set_paused(true);
    clock.set_speed(0.0);
    clock.wall_clock().set(1_718_971_200_000.0);
    clock.reset_now();
    assert_eq!(clock.sim_time_ms(), 1_718_971_200_000.0);
}

#[test]
fn invalid_speeds_are_treated_as_stopped() {
    let mut clock = clock_at(0.0);
    clock.set_speed(-5.0);
    assert_eq!(clock.speed(), 0.0);
    clock.set_speed(f64::NAN);
    assert_eq!(clock.speed(), 0.0);
    clock.tick(1_000.0);
    assert_eq!(clock.sim_time_ms(), 0.0);
}
