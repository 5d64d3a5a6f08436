use instant::{Duration, Instant};
use stereo_view::frame::{FrameClock, FramePacer};

#[test]
fn first_tick_reports_the_nominal_frame_time() {
    let nominal = Duration::from_millis(20);
    let mut clock = FrameClock::new(nominal);

    let time = clock.tick(Instant::now());

    assert_eq!(time.frame_index, 0);
    assert_eq!(time.dt, nominal.as_secs_f32());
}

#[test]
fn ticks_measure_the_time_between_frames() {
    let mut clock = FrameClock::new(Duration::from_millis(20));
    let start = Instant::now();

    clock.tick(start);
    let time = clock.tick(start + Duration::from_millis(40));

    assert_eq!(time.frame_index, 1);
    assert_eq!(time.dt, Duration::from_millis(40).as_secs_f32());
}

#[test]
fn deltas_are_clamped() {
    let mut clock = FrameClock::with_clamps(
        Duration::from_millis(20),
        Duration::from_millis(1),
        Duration::from_millis(100),
    );
    let start = Instant::now();

    clock.tick(start);
    let stalled = clock.tick(start + Duration::from_secs(3));
    assert_eq!(stalled.dt, Duration::from_millis(100).as_secs_f32());

    let repeated = clock.tick(start + Duration::from_secs(3));
    assert_eq!(repeated.dt, Duration::from_millis(1).as_secs_f32());
}

#[test]
fn thirty_fps_budget() {
    let pacer = FramePacer::new(30.0);
    assert_eq!(pacer.budget(), Duration::from_secs_f64(1.0 / 30.0));
}

#[test]
fn invalid_rates_fall_back_to_thirty_fps() {
    let expected = FramePacer::new(30.0).budget();
    for fps in [0.0, -5.0, f64::NAN, f64::INFINITY] {
        assert_eq!(FramePacer::new(fps).budget(), expected, "fps {fps}");
    }
}

#[test]
fn remaining_subtracts_elapsed_and_slack() {
    let pacer = FramePacer::with_slack(10.0, Duration::from_millis(2));

    assert_eq!(
        pacer.remaining(Duration::from_millis(30)),
        Some(Duration::from_millis(68))
    );
    assert_eq!(
        pacer.remaining(Duration::ZERO),
        Some(Duration::from_millis(98))
    );
}

#[test]
fn no_wait_once_the_budget_is_spent() {
    let pacer = FramePacer::with_slack(10.0, Duration::from_millis(2));

    assert_eq!(pacer.remaining(Duration::from_millis(100)), None);
    assert_eq!(pacer.remaining(Duration::from_millis(250)), None);
    // Less than the slack left over is not worth a wait either.
    assert_eq!(pacer.remaining(Duration::from_millis(99)), None);
    assert_eq!(pacer.remaining(Duration::from_millis(98)), None);
}
