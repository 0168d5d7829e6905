use swipekit_test_fixtures::RecordingSurface;
use swipekit_transform_core::{
    AnimateOpts, Config, Ease, ElementId, Engine, EngineEvent, Outputs, Property, StepScheduler,
};

fn cfg_2d() -> Config {
    Config {
        supports_3d: false,
        ..Config::default()
    }
}

fn engine_2d() -> Engine<RecordingSurface> {
    Engine::new(cfg_2d(), RecordingSurface::new())
}

fn engine_3d() -> Engine<RecordingSurface> {
    Engine::new(Config::default(), RecordingSurface::new())
}

fn finished_for(outputs: &Outputs, el: ElementId) -> usize {
    outputs
        .events
        .iter()
        .filter(|e| matches!(e, EngineEvent::AnimationFinished { element, .. } if *element == el))
        .count()
}

/// it should write the identity transform exactly once when watching
#[test]
fn watch_writes_identity_once() {
    let mut engine = engine_2d();
    let el = ElementId(0);
    engine.watch(el);
    assert_eq!(engine.surface().transform_of(el), Some("matrix(1,0,0,1,0,0)"));
    assert_eq!(engine.surface().transform_writes(el), 1);
    // origin is untouched until an origin property is first assigned
    assert_eq!(engine.surface().origin_of(el), None);
    engine.watch(el);
    assert_eq!(engine.surface().transform_writes(el), 1);
}

/// it should treat equal-value writes as pure no-ops
#[test]
fn equal_writes_do_not_recompose() {
    let mut engine = engine_2d();
    let el = ElementId(3);
    engine.watch(el);
    assert!(!engine.set(el, Property::TranslateX, 0.0));
    assert!(!engine.set(el, Property::ScaleX, 1.0));
    assert_eq!(engine.surface().transform_writes(el), 1);
    assert!(engine.outputs().changes.is_empty());

    assert!(engine.set(el, Property::TranslateX, 25.0));
    assert_eq!(engine.surface().transform_writes(el), 2);
    assert_eq!(
        engine.surface().transform_of(el),
        Some("matrix(1,0,0,1,25,0)")
    );
}

/// it should sample a linear tween at 0/50/100 and finish exactly once
#[test]
fn linear_tween_samples_and_finishes() {
    let mut engine = engine_2d();
    let mut sched = StepScheduler::new(50.0);
    let el = ElementId(1);
    engine.animate(el, [(Property::TranslateX, 100.0)], 100.0);
    assert!(engine.is_animating(el));

    sched.advance(&mut engine); // t = 0
    assert_eq!(engine.get(el, Property::TranslateX), 0.0);
    sched.advance(&mut engine); // t = 50
    assert_eq!(engine.get(el, Property::TranslateX), 50.0);
    let outputs = sched.advance(&mut engine); // t = 100: expiry
    assert_eq!(engine.get(el, Property::TranslateX), 100.0);
    assert_eq!(finished_for(&outputs, el), 1);
    assert!(!engine.is_animating(el));

    // nothing left to advance
    let outputs = sched.advance(&mut engine);
    assert!(outputs.is_empty());
}

/// it should snap the exact end value at expiry, not the eased sample
#[test]
fn expiry_snaps_exact_end() {
    let mut engine = engine_2d();
    let mut sched = StepScheduler::new(50.0);
    let el = ElementId(1);
    engine.animate(
        el,
        [(Property::TranslateX, 100.0)],
        (90.0, Ease::OutSine),
    );
    sched.run_until_idle(&mut engine, 100);
    assert_eq!(engine.get(el, Property::TranslateX), 100.0);
}

/// it should fall back to the configured default duration
#[test]
fn default_duration_comes_from_config() {
    let cfg = Config {
        supports_3d: false,
        default_duration_ms: 100.0,
        ..Config::default()
    };
    let mut engine = Engine::new(cfg, RecordingSurface::new());
    let mut sched = StepScheduler::new(50.0);
    let el = ElementId(4);
    engine.animate(el, [(Property::ScaleX, 2.0)], AnimateOpts::default());
    let ticks = sched.run_until_idle(&mut engine, 100);
    assert_eq!(ticks, 3); // 0, 50, 100
    assert_eq!(engine.get(el, Property::ScaleX), 2.0);
}

/// it should finish-immediately on stop(el, true), synchronously and once
#[test]
fn stop_finish_snaps_and_fires_once() {
    let mut engine = engine_2d();
    let mut sched = StepScheduler::new(16.0);
    let el = ElementId(2);
    engine.animate(el, [(Property::ScaleX, 2.0)], 10_000.0);
    sched.advance(&mut engine);

    assert_eq!(engine.stop(el, true), 1);
    assert_eq!(engine.get(el, Property::ScaleX), 2.0);
    assert_eq!(finished_for(engine.outputs(), el), 1);
    assert!(engine
        .surface()
        .transform_of(el)
        .unwrap()
        .starts_with("matrix(2,"));

    // second call is a no-op
    assert_eq!(engine.stop(el, true), 0);
    assert_eq!(finished_for(engine.outputs(), el), 1);
}

/// it should freeze values where they are on stop(el, false)
#[test]
fn stop_without_finish_freezes() {
    let mut engine = engine_2d();
    let mut sched = StepScheduler::new(50.0);
    let el = ElementId(2);
    engine.animate(el, [(Property::TranslateX, 100.0)], 100.0);
    sched.advance(&mut engine); // t = 0
    sched.advance(&mut engine); // t = 50
    assert_eq!(engine.get(el, Property::TranslateX), 50.0);

    assert_eq!(engine.stop(el, false), 1);
    assert!(matches!(
        engine.outputs().events.last(),
        Some(EngineEvent::AnimationInterrupted { .. })
    ));
    let outputs = sched.advance(&mut engine);
    assert_eq!(engine.get(el, Property::TranslateX), 50.0);
    assert!(outputs.is_empty());
}

/// it should complete a degenerate empty-target animation at expiry
#[test]
fn empty_target_set_still_finishes() {
    let mut engine = engine_2d();
    let mut sched = StepScheduler::new(50.0);
    let el = ElementId(5);
    engine.animate(el, std::iter::empty(), 100.0);
    assert!(engine.is_animating(el));
    sched.advance(&mut engine); // t = 0
    sched.advance(&mut engine); // t = 50
    let outputs = sched.advance(&mut engine); // t = 100
    assert_eq!(finished_for(&outputs, el), 1);
    assert!(outputs.changes.is_empty());
    assert!(!engine.is_animating(el));
}

/// it should complete a zero-duration animation on its first tick
#[test]
fn zero_duration_finishes_immediately() {
    let mut engine = engine_2d();
    let el = ElementId(5);
    engine.animate(el, [(Property::TranslateX, 5.0)], 0.0);
    let outputs = engine.tick(1234.5).clone();
    assert_eq!(engine.get(el, Property::TranslateX), 5.0);
    assert_eq!(finished_for(&outputs, el), 1);
}

/// it should run independent records on one element concurrently
#[test]
fn concurrent_records_advance_independently() {
    let mut engine = engine_2d();
    let mut sched = StepScheduler::new(50.0);
    let el = ElementId(6);
    engine.animate(el, [(Property::TranslateX, 100.0)], 100.0);
    engine.animate(el, [(Property::TranslateY, 50.0)], 200.0);

    sched.advance(&mut engine); // 0
    sched.advance(&mut engine); // 50
    assert_eq!(engine.get(el, Property::TranslateX), 50.0);
    assert_eq!(engine.get(el, Property::TranslateY), 12.5);

    sched.advance(&mut engine); // 100: x expires
    assert_eq!(engine.get(el, Property::TranslateX), 100.0);
    assert!(engine.is_animating(el));

    sched.run_until_idle(&mut engine, 100);
    assert_eq!(engine.get(el, Property::TranslateY), 50.0);
}

/// it should let the later record win a same-property race, tick by tick
#[test]
fn same_property_race_is_last_writer_wins() {
    let mut engine = engine_2d();
    let mut sched = StepScheduler::new(50.0);
    let el = ElementId(6);
    engine.animate(el, [(Property::TranslateX, 100.0)], 100.0);
    engine.animate(el, [(Property::TranslateX, 200.0)], 100.0);

    sched.advance(&mut engine); // 0
    sched.advance(&mut engine); // 50: first writes 50, second overwrites 100
    assert_eq!(engine.get(el, Property::TranslateX), 100.0);

    sched.run_until_idle(&mut engine, 100);
    assert_eq!(engine.get(el, Property::TranslateX), 200.0);
}

/// it should stop every busy element on stop_all
#[test]
fn stop_all_finishes_every_registry() {
    let mut engine = engine_2d();
    let a = ElementId(10);
    let b = ElementId(11);
    engine.animate(a, [(Property::TranslateX, 10.0)], 1000.0);
    engine.animate(b, [(Property::ScaleY, 3.0)], 1000.0);
    engine.stop_all(true);
    assert_eq!(engine.get(a, Property::TranslateX), 10.0);
    assert_eq!(engine.get(b, Property::ScaleY), 3.0);
    assert!(!engine.has_active_animations());
}

/// it should store z-axis writes in 2D mode without recomposing
#[test]
fn z_axis_writes_are_inert_in_2d() {
    let mut engine = engine_2d();
    let el = ElementId(8);
    engine.watch(el);
    assert!(engine.set(el, Property::TranslateZ, 50.0));
    assert!(engine.set(el, Property::RotateX, 45.0));
    assert_eq!(engine.get(el, Property::TranslateZ), 50.0);
    assert_eq!(engine.surface().transform_writes(el), 1);
    assert!(engine.outputs().changes.is_empty());
}

/// it should compose through the matrix3d path when the probe says 3D
#[test]
fn probe_selects_matrix3d_path() {
    let mut engine = engine_3d();
    let el = ElementId(9);
    engine.set(el, Property::TranslateX, 7.0);
    let rendered = engine.surface().transform_of(el).unwrap();
    assert!(rendered.starts_with("matrix3d(1,0,0,0,"));
    assert!(rendered.ends_with(",7,0,0,1)"));
}

/// it should write the combined origin string on first origin assignment
#[test]
fn origin_writes_combine_axes() {
    use swipekit_transform_core::OriginValue;
    let mut engine = engine_2d();
    let el = ElementId(12);
    engine.set_origin_x(el, OriginValue::Percent(10.0));
    assert_eq!(engine.surface().origin_of(el), Some("10% center 0px"));
    engine.set_origin_y(el, OriginValue::Top);
    engine.set_origin_z(el, 20.0);
    assert_eq!(engine.surface().origin_of(el), Some("10% top 20px"));
    assert_eq!(engine.surface().origin_writes(el), 3);

    // equal origin write is a no-op
    engine.set_origin_y(el, OriginValue::Top);
    assert_eq!(engine.surface().origin_writes(el), 3);
}

/// it should auto-watch on animate
#[test]
fn animate_auto_watches() {
    let mut engine = engine_2d();
    let el = ElementId(13);
    assert!(!engine.is_watched(el));
    engine.animate(el, [(Property::Rotate, 90.0)], 100.0);
    assert!(engine.is_watched(el));
    assert_eq!(engine.surface().transform_writes(el), 1);
}
