mod common;

use common::{approx, fast_cfg, run_for, run_until, FakeSurface};
use tagline_core::{position, AnimationConfig, Animator, ConfigError, Phase, Wake};

fn started(cfg: AnimationConfig, surface: FakeSurface) -> (Animator<FakeSurface>, f64, Wake) {
    let mut anim = Animator::new(cfg, Some(surface)).expect("config");
    let wake = anim.start(0.0);
    (anim, 0.0, wake)
}

#[test]
fn resize_while_docked_recenters_exactly() {
    let mut cfg = fast_cfg(&["A"]);
    cfg.advance_delay_ms = 10_000.0;
    let (mut anim, mut now, wake) = started(cfg, FakeSurface::new(200.0).with_width("A", 20.0));

    // Idle, before the first layout.
    anim.surface_mut().expect("surface").container_width = 333.0;
    anim.on_resize(now);
    assert_eq!(anim.phase(), Phase::Idle);
    assert_eq!(anim.state().current_x, anim.state().center_x);

    run_until(&mut anim, &mut now, wake, |a| a.phase() == Phase::AtStart);
    for width in [320.0, 199.5, 1024.0, 0.0, 641.0, 641.0] {
        anim.surface_mut().expect("surface").container_width = width;
        anim.on_resize(now);
        assert_eq!(anim.phase(), Phase::AtStart);
        assert_eq!(anim.state().center_x, width / 2.0);
        assert_eq!(anim.state().current_x, anim.state().center_x);
        assert_eq!(anim.render_frame().cursor_offset_px, 0.0);
    }
}

#[test]
fn advance_and_return_are_monotonic_and_land_on_target() {
    let (mut anim, mut now, wake) = started(
        fast_cfg(&["A"]),
        FakeSurface::new(300.0).with_width("A", 76.0),
    );
    run_until(&mut anim, &mut now, wake, |a| {
        a.phase() == Phase::AdvancingToEnd
    });

    let end_x = anim.state().end_x();
    assert_eq!(end_x, 190.0);
    let mut last = anim.state().current_x;
    while anim.phase() == Phase::AdvancingToEnd {
        now += 7.0;
        anim.poll(now);
        let x = anim.state().current_x;
        assert!(x >= last, "advance went backwards: {last} -> {x}");
        last = x;
    }
    assert_eq!(anim.phase(), Phase::AtEnd);
    assert_eq!(anim.state().current_x, end_x);

    anim.poll(now);
    assert_eq!(anim.phase(), Phase::ReturningToStart);
    let mut last = anim.state().current_x;
    while anim.phase() == Phase::ReturningToStart {
        now += 7.0;
        anim.poll(now);
        let x = anim.state().current_x;
        assert!(x <= last, "return went backwards: {last} -> {x}");
        last = x;
    }
    assert_eq!(anim.state().current_x, 150.0);
}

#[test]
fn throttled_host_resumes_at_the_wall_clock_position() {
    let (mut anim, mut now, wake) = started(
        fast_cfg(&["A"]),
        FakeSurface::new(200.0).with_width("A", 20.0),
    );
    run_until(&mut anim, &mut now, wake, |a| {
        a.phase() == Phase::AdvancingToEnd
    });
    let t0 = now;
    // One late frame 75ms in, nothing in between.
    anim.poll(t0 + 75.0);
    assert_eq!(anim.state().current_x, position(100.0, 112.0, 75.0, 100.0));
    // A frame long after the duration completes exactly.
    assert_eq!(anim.poll(t0 + 5_000.0), Wake::After(0.0));
    assert_eq!(anim.state().current_x, 112.0);
}

#[test]
fn second_advance_request_does_not_restart_the_flight() {
    let (mut anim, mut now, wake) = started(
        fast_cfg(&["A"]),
        FakeSurface::new(200.0).with_width("A", 20.0),
    );
    run_until(&mut anim, &mut now, wake, |a| {
        a.phase() == Phase::AdvancingToEnd
    });
    let t0 = now;

    anim.poll(t0 + 30.0);
    let x30 = anim.state().current_x;
    assert_eq!(anim.request_advance(t0 + 30.0), Wake::NextFrame);
    assert_eq!(anim.request_return(t0 + 30.0), Wake::NextFrame);
    assert_eq!(anim.phase(), Phase::AdvancingToEnd);
    assert_eq!(anim.state().current_x, x30);

    // Still on the original timeline, not one restarted at t0 + 30.
    anim.poll(t0 + 50.0);
    approx(anim.state().current_x, 106.0, 1e-4);
    anim.poll(t0 + 100.0);
    assert_eq!(anim.phase(), Phase::AtEnd);
}

#[test]
fn labels_cycle_once_each_in_order() {
    let labels = ["one", "two", "three"];
    let surface = FakeSurface::new(400.0)
        .with_width("one", 30.0)
        .with_width("two", 31.0)
        .with_width("three", 52.0);
    let (mut anim, mut now, wake) = started(fast_cfg(&labels), surface);
    let start_index = anim.state().current_index;

    run_until(&mut anim, &mut now, wake, |a| {
        a.surface().map_or(0, |s| s.commits.len()) == labels.len() + 1
    });

    assert_eq!(anim.state().current_index, start_index);
    let commits = &anim.surface().expect("surface").commits;
    assert_eq!(&commits[..labels.len()], &labels.map(String::from)[..]);
    assert_eq!(commits[labels.len()], labels[0]);
}

#[test]
fn zero_width_label_never_advances() {
    let surface = FakeSurface::new(200.0).with_width("A", 0.0);
    let (mut anim, mut now, wake) = started(fast_cfg(&["A"]), surface);

    let wake = run_for(&mut anim, &mut now, wake, 1_000.0);
    assert_eq!(anim.phase(), Phase::AwaitingLayout);
    assert_eq!(anim.state().label_width, 0.0);
    assert!(anim.surface().expect("surface").measure_calls.get() > 1);

    // Explicit requests are deferred, not honored.
    anim.request_advance(now);
    assert_eq!(anim.phase(), Phase::AwaitingLayout);

    // Once the text actually renders the cycle proceeds.
    anim.surface_mut()
        .expect("surface")
        .widths
        .insert("A".into(), 20.0);
    run_until(&mut anim, &mut now, wake, |a| {
        a.phase() == Phase::AdvancingToEnd
    });
    assert_eq!(anim.state().label_width, 24.0);
}

#[test]
fn pending_measurement_retries_on_following_frames() {
    let surface = FakeSurface::new(200.0)
        .with_width("A", 20.0)
        .with_pending_frames(3);
    let (mut anim, _, _) = started(fast_cfg(&["A"]), surface);

    assert_eq!(anim.poll(0.0), Wake::NextFrame);
    for frame in 1..=3 {
        assert_eq!(anim.poll(frame as f64 * 16.0), Wake::NextFrame);
        assert_eq!(anim.phase(), Phase::AwaitingLayout);
    }
    anim.poll(64.0);
    assert_eq!(anim.phase(), Phase::AtStart);
    assert_eq!(anim.surface().expect("surface").measure_calls.get(), 4);
}

#[test]
fn early_polls_do_not_skip_delays() {
    let mut cfg = fast_cfg(&["A"]);
    cfg.advance_delay_ms = 500.0;
    let (mut anim, mut now, wake) = started(cfg, FakeSurface::new(200.0).with_width("A", 20.0));
    run_until(&mut anim, &mut now, wake, |a| a.phase() == Phase::AtStart);
    let docked_at = now;

    assert_eq!(anim.poll(docked_at + 100.0), Wake::After(400.0));
    assert_eq!(anim.poll(docked_at + 100.0), Wake::After(400.0));
    assert_eq!(anim.phase(), Phase::AtStart);

    // A return request from the start position is out of order.
    anim.request_return(docked_at + 100.0);
    assert_eq!(anim.phase(), Phase::AtStart);

    assert_eq!(anim.poll(docked_at + 500.0), Wake::NextFrame);
    assert_eq!(anim.phase(), Phase::AdvancingToEnd);
}

#[test]
fn resize_mid_flight_keeps_the_captured_endpoints() {
    let (mut anim, mut now, wake) = started(
        fast_cfg(&["A"]),
        FakeSurface::new(200.0).with_width("A", 20.0),
    );
    run_until(&mut anim, &mut now, wake, |a| {
        a.phase() == Phase::AdvancingToEnd
    });
    let t0 = now;
    anim.poll(t0 + 50.0);

    anim.surface_mut().expect("surface").container_width = 400.0;
    anim.on_resize(t0 + 50.0);
    assert_eq!(anim.state().center_x, 200.0);
    approx(anim.state().current_x, 106.0, 1e-4);

    anim.poll(t0 + 100.0);
    assert_eq!(anim.phase(), Phase::AtEnd);
    assert_eq!(anim.state().current_x, 112.0);

    // The return picks up the new center, so the next cycle is centered again.
    run_until(&mut anim, &mut now, Wake::After(0.0), |a| {
        a.phase() == Phase::AtStart
    });
    assert_eq!(anim.state().current_x, 200.0);
    assert_eq!(anim.state().current_x, anim.state().center_x);
}

#[test]
fn disposed_animator_goes_quiet() {
    let (mut anim, mut now, wake) = started(
        fast_cfg(&["A"]),
        FakeSurface::new(200.0).with_width("A", 20.0),
    );
    run_until(&mut anim, &mut now, wake, |a| {
        a.phase() == Phase::AdvancingToEnd
    });
    anim.dispose();
    assert!(anim.is_disposed());

    let frames = anim.surface().expect("surface").frames.len();
    let x = anim.state().current_x;
    assert_eq!(anim.poll(now + 50.0), Wake::Never);
    assert_eq!(anim.on_resize(now + 60.0), Wake::Never);
    assert_eq!(anim.request_return(now + 70.0), Wake::Never);
    assert_eq!(anim.start(now + 80.0), Wake::Never);
    assert_eq!(anim.surface().expect("surface").frames.len(), frames);
    assert_eq!(anim.state().current_x, x);
}

#[test]
fn missing_surface_stays_idle() {
    let mut anim = Animator::<FakeSurface>::new(fast_cfg(&["A"]), None).expect("config");
    assert_eq!(anim.start(0.0), Wake::Never);
    assert_eq!(anim.poll(100.0), Wake::Never);
    assert_eq!(anim.on_resize(100.0), Wake::Never);
    assert_eq!(anim.request_advance(100.0), Wake::Never);
    assert_eq!(anim.phase(), Phase::Idle);
}

#[test]
fn invalid_config_is_rejected_at_construction() {
    let err = Animator::new(fast_cfg(&[]), Some(FakeSurface::new(10.0))).unwrap_err();
    assert_eq!(err, ConfigError::EmptyLabels);
}
