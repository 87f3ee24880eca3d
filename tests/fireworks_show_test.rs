use fireworks_canvas::physic_engine::config::ShowConfig;
use fireworks_canvas::physic_engine::particle::Particle;
use fireworks_canvas::physic_engine::rocket::Rocket;
use fireworks_canvas::physic_engine::FireworksShow;
use fireworks_canvas::renderer_engine::{Color, CompositeMode, PixelCanvas, Surface};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

mod helpers;
use helpers::{DrawOp, RecordingSurface};

const WIDTH: f32 = 1000.0;
const HEIGHT: f32 = 800.0;

fn manual_config(particle_count: i32) -> ShowConfig {
    ShowConfig {
        particle_count,
        auto_launch: false,
        ..ShowConfig::default()
    }
}

fn manual_show(particle_count: i32) -> FireworksShow {
    FireworksShow::with_seed(&manual_config(particle_count), WIDTH, HEIGHT, 42)
}

/// Fusée déjà "arrivée" : cible = point de départ, explose au premier pas.
fn instant_rocket(show: &FireworksShow, seed: u64) -> Rocket {
    let origin = show.launch_origin();
    let mut rng = StdRng::seed_from_u64(seed);
    Rocket::new(origin.x, origin.y, origin.x, origin.y, &mut rng)
}

fn far_rocket(show: &FireworksShow, tx: f32, seed: u64) -> Rocket {
    let origin = show.launch_origin();
    let mut rng = StdRng::seed_from_u64(seed);
    Rocket::new(origin.x, origin.y, tx, 10.0, &mut rng)
}

// ==================================
// 1. Construction
// ==================================

#[test]
fn test_new_show_requests_first_frame_and_arms_timer() {
    let show = FireworksShow::with_seed(&ShowConfig::default(), WIDTH, HEIGHT, 1);
    assert!(show.is_alive());
    assert!(show.frame_pending());
    assert!(show.auto_launch());
    assert_eq!(show.active_intervals(), 1);
    assert_eq!(show.particle_count(), 100);
    assert_eq!(show.auto_launch_interval(), Duration::from_millis(800));
    assert!(show.rockets().is_empty());
    assert!(show.particles().is_empty());
}

#[test]
fn test_manual_show_has_no_timer() {
    let show = manual_show(100);
    assert!(!show.auto_launch());
    assert_eq!(show.active_intervals(), 0);
}

// ==================================
// 2. Lancement
// ==================================

#[test]
fn test_launch_starts_from_bottom_center_towards_target() {
    let mut show = manual_show(100);
    show.launch(Some(250.0), Some(120.0));

    let rocket = &show.rockets()[0];
    assert_eq!(rocket.start, Vec2::new(WIDTH / 2.0, HEIGHT));
    assert_eq!(rocket.target, Vec2::new(250.0, 120.0));
}

#[test]
fn test_random_targets_stay_in_upper_half() {
    let mut show = manual_show(100);
    for _ in 0..500 {
        show.launch(None, None);
    }
    for rocket in show.rockets() {
        assert!((0.0..WIDTH).contains(&rocket.target.x));
        assert!((0.0..HEIGHT / 2.0).contains(&rocket.target.y));
    }
}

#[test]
fn test_partial_target_keeps_given_coordinate() {
    let mut show = manual_show(100);
    show.launch(Some(42.0), None);
    show.launch(None, Some(17.0));
    assert_eq!(show.rockets()[0].target.x, 42.0);
    assert_eq!(show.rockets()[1].target.y, 17.0);
}

#[test]
fn test_resize_only_affects_later_launches() {
    let mut show = manual_show(100);
    show.launch(Some(10.0), Some(10.0));
    show.on_resize(400.0, 300.0);
    show.launch(Some(10.0), Some(10.0));

    assert_eq!(show.size(), (400.0, 300.0));
    assert_eq!(show.rockets()[0].start, Vec2::new(500.0, 800.0));
    assert_eq!(show.rockets()[1].start, Vec2::new(200.0, 300.0));
}

// ==================================
// 3. Frame
// ==================================

#[test]
fn test_frame_starts_with_fade_then_switches_to_additive() {
    let mut show = manual_show(100);
    show.launch(Some(100.0), Some(100.0));

    let mut surface = RecordingSurface::new(WIDTH, HEIGHT);
    let report = show.frame_tick(Some(&mut surface));
    assert!(report.ran);
    assert_eq!(report.rockets_drawn, 1);

    assert_eq!(surface.ops[0], DrawOp::SetMode(CompositeMode::DestinationOut));
    assert_eq!(
        surface.ops[1],
        DrawOp::FillRect {
            x: 0.0,
            y: 0.0,
            width: WIDTH,
            height: HEIGHT,
            color: Color::new(0.0, 0.0, 0.0, 0.5),
            mode: CompositeMode::DestinationOut,
        }
    );
    assert_eq!(surface.ops[2], DrawOp::SetMode(CompositeMode::Lighter));
    assert!(surface.ops[3..]
        .iter()
        .all(|op| matches!(op, DrawOp::StrokeLine { mode: CompositeMode::Lighter, .. })));
    assert_eq!(surface.composite_mode(), CompositeMode::Lighter);
}

#[test]
fn test_arrival_fans_out_particles_processed_same_frame() {
    let mut show = manual_show(50);
    let rocket = instant_rocket(&show, 7);
    let hue = rocket.hue;
    let target = rocket.target;
    show.add_rocket(rocket);

    let mut surface = RecordingSurface::new(WIDTH, HEIGHT);
    let report = show.frame_tick(Some(&mut surface));

    assert_eq!(report.arrivals, 1);
    assert_eq!(report.particles_spawned, 50);
    assert_eq!(report.particles_drawn, 50);
    assert!(show.rockets().is_empty());
    assert_eq!(show.particles().len(), 50);
    for particle in show.particles() {
        assert_eq!(particle.hue, hue);
        // déjà avancées d'un pas, trail amorcé sur le point d'explosion
        assert_eq!(particle.trail.newest(), Some(target));
    }
    // 1 trait de fusée + 50 traits de particules
    assert_eq!(surface.strokes(), 51);
}

/// Trois fusées dont une seule (en position `arriving`) explose à cette frame.
fn removal_during_frame(arriving: usize) {
    let mut show = manual_show(10);
    let far_targets = [100.0, 900.0];
    let mut far = far_targets.iter();
    for slot in 0..3 {
        let rocket = if slot == arriving {
            instant_rocket(&show, slot as u64)
        } else {
            let tx = *far.next().unwrap();
            far_rocket(&show, tx, slot as u64)
        };
        show.add_rocket(rocket);
    }

    let mut surface = RecordingSurface::new(WIDTH, HEIGHT);
    let report = show.frame_tick(Some(&mut surface));

    assert_eq!(report.rockets_drawn, 3, "arriving rocket #{arriving}");
    assert_eq!(report.arrivals, 1);
    let targets: Vec<f32> = show.rockets().iter().map(|r| r.target.x).collect();
    assert_eq!(targets, far_targets.to_vec(), "arriving rocket #{arriving}");
    assert_eq!(show.particles().len(), 10);
}

#[test]
fn test_removing_first_arrived_rocket_keeps_the_others() {
    removal_during_frame(0);
}

#[test]
fn test_removing_middle_arrived_rocket_keeps_the_others() {
    removal_during_frame(1);
}

#[test]
fn test_removing_last_arrived_rocket_keeps_the_others() {
    removal_during_frame(2);
}

#[test]
fn test_added_particle_is_drawn_then_expires() {
    let mut show = manual_show(100);
    let mut rng = StdRng::seed_from_u64(21);
    let mut particle = Particle::new(300.0, 200.0, 90.0, &mut rng);
    particle.decay = 0.5;
    show.add_particle(particle);

    let mut surface = RecordingSurface::new(WIDTH, HEIGHT);
    let report = show.frame_tick(Some(&mut surface));
    assert_eq!(report.particles_drawn, 1);
    assert_eq!(surface.strokes(), 1);

    // alpha = 0.5 <= decay : retirée sans être dessinée
    let report = show.frame_tick(Some(&mut surface));
    assert_eq!(report.particles_drawn, 0);
    assert_eq!(report.particles_expired, 1);
    assert!(show.particles().is_empty());

    show.teardown();
    show.add_particle(particle);
    assert!(show.particles().is_empty());
}

#[test]
fn test_negative_particle_count_spawns_nothing() {
    let mut show = manual_show(-5);
    let rocket = instant_rocket(&show, 4);
    show.add_rocket(rocket);

    let mut surface = RecordingSurface::new(WIDTH, HEIGHT);
    let report = show.frame_tick(Some(&mut surface));

    assert_eq!(report.arrivals, 1);
    assert_eq!(report.particles_spawned, 0);
    assert!(show.rockets().is_empty());
    assert!(show.particles().is_empty());
}

#[test]
fn test_particle_count_is_read_at_explosion_time() {
    let mut show = manual_show(100);
    show.launch(Some(WIDTH / 2.0), Some(HEIGHT - 60.0));

    let mut surface = RecordingSurface::new(WIDTH, HEIGHT);
    assert_eq!(show.frame_tick(Some(&mut surface)).arrivals, 0);

    show.set_particle_count(7);
    let mut spawned = 0;
    for _ in 0..100 {
        spawned += show.frame_tick(Some(&mut surface)).particles_spawned;
        if show.rockets().is_empty() {
            break;
        }
    }
    assert_eq!(spawned, 7);
}

#[test]
fn test_all_particles_eventually_expire() {
    let mut show = manual_show(30);
    let rocket = instant_rocket(&show, 5);
    show.add_rocket(rocket);

    let mut canvas = PixelCanvas::new(WIDTH as u32, HEIGHT as u32);
    let mut spawned = 0;
    let mut expired = 0;
    for _ in 0..200 {
        let report = show.frame_tick(Some(&mut canvas));
        spawned += report.particles_spawned;
        expired += report.particles_expired;
    }
    assert_eq!(spawned, 30);
    assert_eq!(expired, 30);
    assert!(show.particles().is_empty());
}

#[test]
fn test_missing_surface_skips_update_but_reschedules() {
    let mut show = manual_show(100);
    show.launch(Some(100.0), Some(100.0));
    let before = show.rockets()[0].pos;

    let report = show.frame_tick(None);

    assert!(!report.ran);
    assert!(show.frame_pending());
    assert_eq!(show.rockets()[0].pos, before);
}

#[test]
fn test_each_served_frame_requests_the_next() {
    let mut show = manual_show(100);
    let mut surface = RecordingSurface::new(WIDTH, HEIGHT);
    assert!(show.frame_tick(Some(&mut surface)).ran);

    assert!(show.frame_pending());
    assert!(show.frame_tick(Some(&mut surface)).ran);
    assert!(show.frame_pending());
}

// ==================================
// 4. Auto-lancement
// ==================================

#[test]
fn test_auto_launch_fires_every_interval() {
    let mut show = FireworksShow::with_seed(&ShowConfig::default(), WIDTH, HEIGHT, 9);

    let step = Duration::from_millis(16);
    let mut launched = 0;
    for _ in 0..500 {
        launched += show.advance_timers(step);
    }

    // 500 x 16 ms = 8000 ms = 10 x 800 ms
    assert_eq!(launched, 10);
    assert_eq!(show.rockets().len(), 10);
}

#[test]
fn test_toggling_auto_launch_never_leaks_timers() {
    let mut show = FireworksShow::with_seed(&ShowConfig::default(), WIDTH, HEIGHT, 10);

    show.set_auto_launch(false);
    assert_eq!(show.active_intervals(), 0);
    show.set_auto_launch(true);
    show.set_auto_launch(true);
    assert_eq!(show.active_intervals(), 1);

    let mut launched = 0;
    for _ in 0..500 {
        launched += show.advance_timers(Duration::from_millis(16));
    }
    assert_eq!(launched, 10);
}

#[test]
fn test_disabled_auto_launch_does_not_launch() {
    let mut show = manual_show(100);
    assert_eq!(show.advance_timers(Duration::from_secs(10)), 0);
    assert!(!show.auto_launch_tick());
    assert!(show.rockets().is_empty());
}

#[test]
fn test_apply_config_rearms_timer_with_new_interval() {
    let mut show = FireworksShow::with_seed(&ShowConfig::default(), WIDTH, HEIGHT, 11);
    let config = ShowConfig {
        auto_launch_interval_ms: 200,
        particle_count: 12,
        fade_alpha: 0.25,
        ..ShowConfig::default()
    };
    show.apply_config(&config);

    assert_eq!(show.active_intervals(), 1);
    assert_eq!(show.auto_launch_interval(), Duration::from_millis(200));
    assert_eq!(show.particle_count(), 12);
    assert_eq!(show.fade_alpha(), 0.25);
    let launched: usize = (0..5)
        .map(|_| show.advance_timers(Duration::from_millis(200)))
        .sum();
    assert_eq!(launched, 5);
}

#[test]
fn test_long_stall_launches_a_single_rocket() {
    let mut show = FireworksShow::with_seed(&ShowConfig::default(), WIDTH, HEIGHT, 13);

    assert_eq!(show.advance_timers(Duration::from_secs(60)), 1);
    assert_eq!(show.rockets().len(), 1);

    // la cadence normale reprend ensuite
    let mut launched = 0;
    for _ in 0..50 {
        launched += show.advance_timers(Duration::from_millis(16));
    }
    assert_eq!(launched, 1);
}

// ==================================
// 5. Teardown
// ==================================

#[test]
fn test_teardown_stops_everything() {
    let mut show = FireworksShow::with_seed(&ShowConfig::default(), WIDTH, HEIGHT, 12);
    show.launch(Some(10.0), Some(10.0));
    show.teardown();

    assert!(!show.is_alive());
    assert!(!show.frame_pending());
    assert_eq!(show.active_intervals(), 0);
    assert!(show.rockets().is_empty());

    let mut surface = RecordingSurface::new(WIDTH, HEIGHT);
    assert!(!show.frame_tick(Some(&mut surface)).ran);
    assert!(surface.ops.is_empty());
    assert_eq!(show.advance_timers(Duration::from_secs(5)), 0);

    show.launch(Some(10.0), Some(10.0));
    show.set_auto_launch(true);
    assert!(show.rockets().is_empty());
    assert_eq!(show.active_intervals(), 0);

    // idempotent
    show.teardown();
    assert!(!show.is_alive());
}
