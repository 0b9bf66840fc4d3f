use crate::*;

use std::sync::{Arc, Mutex};

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        debug_assert!(start < end_exclusive);
        let span = (end_exclusive - start) as u64;
        start + (self.next_u64() % span) as usize
    }
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

fn params() -> TransformParams {
    TransformParams {
        spacing: 100.0,
        wing_span: 80.0,
        rotation: 50.0,
        mid_rotation: 30.0,
        perspective: 800.0,
        scale_down: 0.8,
        scale_further: 0.75,
    }
}

type Fired = Arc<Mutex<Vec<usize>>>;

fn coverflow(count: usize, initial_selection: usize) -> (Coverflow, Fired, Fired) {
    let changes: Fired = Arc::new(Mutex::new(Vec::new()));
    let presses: Fired = Arc::new(Mutex::new(Vec::new()));
    let c = Arc::clone(&changes);
    let p = Arc::clone(&presses);
    let mut cf = Coverflow::new(
        CoverflowOptions::new(count, move |i| c.lock().unwrap().push(i))
            .with_on_press(Some(move |i| p.lock().unwrap().push(i)))
            .with_initial_selection(initial_selection),
    );
    cf.set_container_width(320);
    (cf, changes, presses)
}

fn settle<K>(cf: &mut Coverflow<K>, mut now_ms: u64) -> u64 {
    for _ in 0..10_000 {
        now_ms += 16;
        if cf.tick(now_ms).is_none() {
            return now_ms;
        }
    }
    panic!("animation did not settle");
}

// ---------------------------------------------------------------------------
// transform interpolation

#[test]
fn transform_is_symmetric_about_center() {
    let p = params();
    for d in [0.0f32, 0.25, 0.5, 0.6, 1.0, 1.5, 2.0, 2.7, 5.0] {
        let pos = item_transform(d, &p);
        let neg = item_transform(-d, &p);
        assert!(approx(pos.translate_x, -neg.translate_x), "translate at {d}");
        assert!(approx(pos.rotate_y, -neg.rotate_y), "rotation at {d}");
        assert!(approx(pos.scale, neg.scale), "scale at {d}");
    }
}

#[test]
fn transform_is_identity_at_center() {
    let t = item_transform(0.0, &params());
    assert!(approx(t.translate_x, 0.0));
    assert!(approx(t.scale, 1.0));
    assert!(approx(t.rotate_y, 0.0));
    assert!(approx(t.perspective, 800.0));
}

#[test]
fn transform_clamps_outside_control_range() {
    let p = params();
    for d in [2.0f32, 2.5, 3.0, 10.0, 1e6] {
        assert_eq!(item_transform(d, &p), item_transform(2.0, &p), "at {d}");
        assert_eq!(item_transform(-d, &p), item_transform(-2.0, &p), "at -{d}");
    }
}

#[test]
fn transform_control_point_values() {
    let p = params();

    let near = item_transform(-1.0, &p);
    assert!(approx(near.translate_x, p.spacing));
    assert!(approx(near.scale, p.scale_down));
    assert!(approx(near.rotate_y, -p.rotation));

    let far = item_transform(-2.0, &p);
    assert!(approx(far.translate_x, p.spacing + p.wing_span));
    assert!(approx(far.scale, p.scale_further));
    assert!(approx(far.rotate_y, -p.rotation));
}

#[test]
fn rotation_ramp_is_steeper_near_center() {
    let p = params();
    // The ±0.5 control point pins the mid rotation...
    assert!(approx(item_transform(0.5, &p).rotate_y, p.mid_rotation));
    // ...and the segment above it interpolates toward the full rotation.
    let expected = p.mid_rotation + (p.rotation - p.mid_rotation) * 0.5;
    assert!(approx(item_transform(0.75, &p).rotate_y, expected));
    // Inner segment is linear from 0 to mid over half an offset.
    assert!(approx(item_transform(0.25, &p).rotate_y, p.mid_rotation * 0.5));
}

#[test]
fn focus_proximity_saturates_at_one() {
    let (mut cf, _, _) = coverflow(8, 0);
    cf.set_scroll_position(2.0);
    assert!(approx(cf.focus_proximity(2), 0.0));
    assert!(approx(cf.focus_proximity(3), 1.0));
    assert!(approx(cf.focus_proximity(7), 1.0));
    assert!(approx(cf.focus_proximity(1), -1.0));
    assert!(approx(cf.focus_proximity(0), -1.0));

    cf.set_scroll_position(2.5);
    assert!(approx(cf.focus_proximity(3), 0.5));
    assert!(approx(cf.focus_proximity(2), -0.5));
}

// ---------------------------------------------------------------------------
// paint order

#[test]
fn paint_order_small_cases() {
    let mut out = Vec::new();
    collect_paint_order(4, 1, &mut out);
    assert_eq!(out, [0, 3, 2, 1]);

    collect_paint_order(3, 0, &mut out);
    assert_eq!(out, [2, 1, 0]);

    collect_paint_order(3, 2, &mut out);
    assert_eq!(out, [0, 1, 2]);

    collect_paint_order(1, 0, &mut out);
    assert_eq!(out, [0]);

    collect_paint_order(0, 0, &mut out);
    assert!(out.is_empty());
}

#[test]
fn paint_order_is_a_permutation_ending_at_selection() {
    let mut rng = Lcg::new(42);
    let mut out = Vec::new();
    for _ in 0..200 {
        let count = rng.gen_range_usize(1, 30);
        let selection = rng.gen_range_usize(0, count);
        collect_paint_order(count, selection, &mut out);

        assert_eq!(out.len(), count);
        assert_eq!(*out.last().unwrap(), selection);
        let mut seen = vec![false; count];
        for &i in &out {
            assert!(!seen[i], "duplicate ordinal {i}");
            seen[i] = true;
        }
    }
}

// ---------------------------------------------------------------------------
// selection derivation

#[test]
fn selection_is_clamped_round_of_position() {
    let (mut cf, _, _) = coverflow(8, 0);
    for (pos, expected) in [
        (0.0f32, 0usize),
        (0.4, 0),
        (0.6, 1),
        (3.5, 4),
        (6.9, 7),
        (7.4, 7),
        (9.3, 7),
        (-0.4, 0),
        (-2.0, 0),
    ] {
        cf.set_scroll_position(pos);
        assert_eq!(cf.selection(), expected, "at {pos}");
        // Idempotent under repeated identical positions.
        cf.set_scroll_position(pos);
        assert_eq!(cf.selection(), expected);
    }
}

#[test]
fn programmatic_set_never_notifies() {
    let (mut cf, changes, _) = coverflow(8, 0);
    cf.set_scroll_position(5.0);
    cf.set_scroll_position(2.3);
    assert!(changes.lock().unwrap().is_empty());
    assert_eq!(cf.animation_state(), AnimationState::Idle);
}

// ---------------------------------------------------------------------------
// taps

#[test]
fn tap_on_centered_item_activates_without_moving() {
    let (mut cf, changes, presses) = coverflow(8, 2);
    cf.tap_item(2);
    assert_eq!(*presses.lock().unwrap(), [2]);
    assert!(changes.lock().unwrap().is_empty());
    assert_eq!(cf.animation_state(), AnimationState::Idle);
    assert_eq!(cf.scroll_position(), 2.0);
}

#[test]
fn tap_on_other_item_notifies_eagerly_then_settles() {
    let (mut cf, changes, presses) = coverflow(8, 2);
    cf.tap_item(5);

    // The host learns the authoritative selection before the spring has moved anything.
    assert_eq!(*changes.lock().unwrap(), [5]);
    assert_eq!(cf.scroll_position(), 2.0);
    assert_eq!(cf.animation_state(), AnimationState::Springing);

    settle(&mut cf, 0);
    assert_eq!(cf.scroll_position(), 5.0);
    assert_eq!(cf.selection(), 5);
    assert_eq!(cf.animation_state(), AnimationState::Idle);
    // Exactly once, and no press.
    assert_eq!(*changes.lock().unwrap(), [5]);
    assert!(presses.lock().unwrap().is_empty());
}

#[test]
fn tap_on_centered_item_without_on_press_does_nothing() {
    let changes: Fired = Arc::new(Mutex::new(Vec::new()));
    let c = Arc::clone(&changes);
    let mut cf = Coverflow::new(
        CoverflowOptions::new(4, move |i| c.lock().unwrap().push(i)).with_initial_selection(1),
    );
    cf.set_container_width(100);
    cf.tap_item(1);
    assert!(changes.lock().unwrap().is_empty());
    assert_eq!(cf.animation_state(), AnimationState::Idle);
}

// ---------------------------------------------------------------------------
// drags and releases

#[test]
fn drag_moves_position_against_finger_direction() {
    let (mut cf, _, _) = coverflow(8, 3);
    assert!(cf.drag_start());
    cf.drag_move(-30.0);
    assert_eq!(cf.animation_state(), AnimationState::Dragging);
    assert!(approx(cf.scroll_position(), 3.5));
    cf.drag_move(-90.0);
    assert!(approx(cf.scroll_position(), 4.5));
    // Deltas are cumulative from the gesture start, not additive per sample.
    cf.drag_move(-30.0);
    assert!(approx(cf.scroll_position(), 3.5));
}

#[test]
fn drag_is_not_clamped_while_held() {
    let (mut cf, _, _) = coverflow(4, 0);
    cf.drag_start();
    cf.drag_move(120.0);
    assert!(approx(cf.scroll_position(), -2.0));
    cf.drag_release(0.0);
    settle(&mut cf, 0);
    assert_eq!(cf.scroll_position(), 0.0);
}

#[test]
fn edge_release_snaps_directly_regardless_of_velocity() {
    let (mut cf, changes, _) = coverflow(8, 0);
    cf.drag_start();
    cf.drag_move(-12.0);
    cf.drag_release(-600.0);
    assert_ne!(cf.animation_state(), AnimationState::Decaying);
    assert_eq!(cf.animation_state(), AnimationState::Springing);

    settle(&mut cf, 0);
    assert_eq!(cf.scroll_position(), 0.0);
    // Settling back onto the same selection stays silent.
    assert!(changes.lock().unwrap().is_empty());
}

#[test]
fn near_far_edge_release_snaps_directly() {
    let (mut cf, _, _) = coverflow(8, 6);
    cf.drag_start();
    cf.drag_move(-6.0);
    cf.drag_release(-900.0);
    assert_eq!(cf.animation_state(), AnimationState::Springing);
}

#[test]
fn slow_interior_release_snaps_directly() {
    let (mut cf, changes, _) = coverflow(8, 3);
    cf.drag_start();
    cf.drag_move(-30.0);
    cf.drag_release(-30.0); // 0.5 position units/s, below the decay trigger
    assert_eq!(cf.animation_state(), AnimationState::Springing);
    settle(&mut cf, 0);
    assert_eq!(cf.scroll_position(), 4.0);
    assert_eq!(*changes.lock().unwrap(), [4]);
}

#[test]
fn fast_interior_release_decays_then_chains_into_spring() {
    let (mut cf, changes, _) = coverflow(8, 3);
    cf.drag_start();
    cf.drag_move(-30.0);
    cf.drag_release(-240.0); // 4 position units/s
    assert_eq!(cf.animation_state(), AnimationState::Decaying);
    assert!(changes.lock().unwrap().is_empty());

    let mut saw_spring = false;
    let mut now_ms = 0;
    for _ in 0..10_000 {
        now_ms += 16;
        if cf.tick(now_ms).is_none() {
            break;
        }
        saw_spring |= cf.animation_state() == AnimationState::Springing;
    }
    assert!(saw_spring, "decay never chained into a spring");
    assert_eq!(cf.animation_state(), AnimationState::Idle);

    // Ends exactly on an integer index, further along than where the drag left off.
    let end = cf.scroll_position();
    assert_eq!(end, end.round());
    assert!(end > 3.5);
    assert_eq!(*changes.lock().unwrap(), [end as usize]);
}

#[test]
fn interrupted_decay_does_not_chain() {
    let (mut cf, changes, _) = coverflow(8, 3);
    cf.drag_start();
    cf.drag_move(-30.0);
    cf.drag_release(-240.0);

    cf.tick(0);
    cf.tick(16);
    assert_eq!(cf.animation_state(), AnimationState::Decaying);

    // A new gesture cancels the decay mid-flight; no snap spring, no notification.
    assert!(cf.drag_start());
    assert_eq!(cf.animation_state(), AnimationState::Dragging);
    assert_eq!(cf.tick(32), None);
    assert_eq!(cf.tick(48), None);
    assert!(changes.lock().unwrap().is_empty());
}

#[test]
fn decay_launch_speed_is_clamped() {
    let (mut cf, _, _) = coverflow(8, 3);
    cf.drag_start();
    cf.drag_move(-6.0);
    let start = cf.scroll_position();
    cf.drag_release(-6000.0); // 100 position units/s before clamping

    cf.tick(0);
    cf.tick(16);
    let moved = cf.scroll_position() - start;
    // One 16 ms step at a clamped speed in [3, 5] units/s (after one decay step).
    assert!(moved > 3.0 * 0.9 * 0.016, "moved {moved}");
    assert!(moved < 5.0 * 1.01 * 0.016, "moved {moved}");
}

#[test]
fn release_on_an_exact_integer_goes_idle() {
    let (mut cf, changes, _) = coverflow(8, 0);
    cf.drag_start();
    cf.drag_move(-60.0); // exactly one position unit
    assert_eq!(cf.scroll_position(), 1.0);

    // The snap target equals the current position, so no spring starts; the gesture is
    // still over and the drive must not stay in `Dragging`.
    cf.drag_release(0.0);
    assert_eq!(cf.animation_state(), AnimationState::Idle);
    assert_eq!(cf.tick(16), None);
    assert_eq!(*changes.lock().unwrap(), [1]);
}

#[test]
fn spring_snaps_exactly_onto_target() {
    let (mut cf, _, _) = coverflow(8, 0);
    cf.drag_start();
    cf.drag_move(-157.0);
    cf.drag_release(0.0);
    settle(&mut cf, 0);
    assert_eq!(cf.scroll_position(), 3.0);
    assert_eq!(cf.selection(), 3);
}

// ---------------------------------------------------------------------------
// edge policies

#[test]
fn zero_count_is_inert() {
    let (mut cf, changes, presses) = coverflow(0, 0);
    assert!(!cf.drag_start());
    cf.tap_item(0);
    cf.select(3);
    assert_eq!(cf.tick(16), None);

    let mut items = Vec::new();
    cf.collect_items(&mut items);
    assert!(items.is_empty());
    assert!(changes.lock().unwrap().is_empty());
    assert!(presses.lock().unwrap().is_empty());
}

#[test]
fn transforms_wait_for_a_measured_width() {
    let changes: Fired = Arc::new(Mutex::new(Vec::new()));
    let c = Arc::clone(&changes);
    let mut cf = Coverflow::new(CoverflowOptions::new(5, move |i| c.lock().unwrap().push(i)));

    assert_eq!(cf.item_transform(0), None);
    let mut items = Vec::new();
    cf.collect_items(&mut items);
    assert!(items.is_empty());

    cf.set_container_width(240);
    assert!(cf.item_transform(0).is_some());
    cf.collect_items(&mut items);
    assert_eq!(items.len(), 5);
}

#[test]
fn out_of_range_initial_selection_is_clamped() {
    let (cf, changes, _) = coverflow(4, 99);
    assert_eq!(cf.selection(), 3);
    assert_eq!(cf.scroll_position(), 3.0);
    assert!(changes.lock().unwrap().is_empty());
}

#[test]
fn shrinking_the_collection_clamps_without_notifying() {
    let (mut cf, changes, _) = coverflow(8, 6);
    cf.set_count(3);
    assert_eq!(cf.selection(), 2);
    assert_eq!(cf.scroll_position(), 2.0);
    assert_eq!(cf.animation_state(), AnimationState::Idle);
    assert!(changes.lock().unwrap().is_empty());

    // The corrective reset is authoritative: a later snap to the same index stays silent.
    cf.select(2);
    assert!(changes.lock().unwrap().is_empty());
}

#[test]
fn shrinking_the_collection_cancels_an_out_of_range_spring() {
    let (mut cf, changes, _) = coverflow(8, 2);
    cf.select(7);
    cf.tick(0);
    cf.tick(16);
    assert_eq!(cf.animation_state(), AnimationState::Springing);
    assert_eq!(*changes.lock().unwrap(), [7]);

    // The spring's target no longer exists; the shrink cancels it and clamps in place.
    cf.set_count(3);
    assert_eq!(cf.animation_state(), AnimationState::Idle);
    assert_eq!(cf.scroll_position(), 2.0);
    assert_eq!(cf.selection(), 2);
    settle(&mut cf, 32);
    assert_eq!(cf.scroll_position(), 2.0);
    // The corrective reset stays silent.
    assert_eq!(*changes.lock().unwrap(), [7]);
}

#[test]
fn growing_the_collection_keeps_the_selection() {
    let (mut cf, changes, _) = coverflow(3, 2);
    cf.set_count(10);
    assert_eq!(cf.selection(), 2);
    assert!(changes.lock().unwrap().is_empty());
}

#[test]
fn disabled_interaction_ignores_gestures_but_not_programmatic_moves() {
    let (mut cf, changes, presses) = coverflow(8, 2);
    cf.set_disable_interaction(true);

    assert!(!cf.drag_start());
    cf.drag_move(-120.0);
    cf.drag_release(-600.0);
    cf.tap_item(5);
    assert_eq!(cf.scroll_position(), 2.0);
    assert!(changes.lock().unwrap().is_empty());
    assert!(presses.lock().unwrap().is_empty());

    cf.set_scroll_position(4.0);
    assert_eq!(cf.selection(), 4);

    cf.select(6);
    assert_eq!(*changes.lock().unwrap(), [6]);
    settle(&mut cf, 0);
    assert_eq!(cf.scroll_position(), 6.0);
}

// ---------------------------------------------------------------------------
// transforms through the engine

#[test]
fn centered_item_has_identity_transform_at_every_index() {
    let (mut cf, _, _) = coverflow(6, 0);
    for i in 0..6 {
        cf.set_scroll_position(i as f32);
        let t = cf.item_transform(i).unwrap();
        assert!(approx(t.translate_x, 0.0), "index {i}");
        assert!(approx(t.scale, 1.0), "index {i}");
        assert!(approx(t.rotate_y, 0.0), "index {i}");
    }
}

#[test]
fn items_iterate_in_paint_order_with_keys() {
    let changes: Fired = Arc::new(Mutex::new(Vec::new()));
    let c = Arc::clone(&changes);
    let mut cf = Coverflow::new(CoverflowOptions::new_with_key(
        4,
        move |i| c.lock().unwrap().push(i),
        |i| 100 + i as u64,
    ));
    cf.set_container_width(320);
    cf.set_scroll_position(1.0);

    let mut items = Vec::new();
    cf.collect_items_keyed(&mut items);
    let indexes: Vec<usize> = items.iter().map(|it| it.index).collect();
    let keys: Vec<u64> = items.iter().map(|it| it.key).collect();
    assert_eq!(indexes, [0, 3, 2, 1]);
    assert_eq!(keys, [100, 103, 102, 101]);
    // Selection is painted last and carries the identity transform.
    assert!(approx(items[3].transform.scale, 1.0));
}

// ---------------------------------------------------------------------------
// position model and listeners

#[test]
fn listeners_observe_every_change_until_unsubscribed() {
    let (mut cf, _, _) = coverflow(8, 0);
    let seen = Arc::new(Mutex::new(Vec::new()));
    let s = Arc::clone(&seen);
    let id = cf.subscribe_position(Arc::new(move |v| s.lock().unwrap().push(v)));

    cf.drag_start();
    cf.drag_move(-30.0);
    cf.drag_move(-60.0);
    cf.set_scroll_position(5.0);
    assert_eq!(*seen.lock().unwrap(), [0.5, 1.0, 5.0]);

    assert!(cf.unsubscribe_position(id));
    cf.set_scroll_position(1.0);
    assert_eq!(seen.lock().unwrap().len(), 3);
    assert!(!cf.unsubscribe_position(id));
}

#[test]
fn listeners_observe_animation_ticks() {
    let (mut cf, _, _) = coverflow(8, 2);
    let seen = Arc::new(Mutex::new(Vec::new()));
    let s = Arc::clone(&seen);
    cf.subscribe_position(Arc::new(move |v| s.lock().unwrap().push(v)));

    cf.select(4);
    settle(&mut cf, 0);

    let seen = seen.lock().unwrap();
    assert!(seen.len() > 2, "expected one value per spring tick");
    assert!(seen.windows(2).all(|w| w[0] <= w[1]), "spring overshot");
    assert_eq!(*seen.last().unwrap(), 4.0);
}

// ---------------------------------------------------------------------------
// gesture policy units

#[test]
fn release_policy_decays_only_fast_interior_releases() {
    assert_eq!(release_action(3, 8, 0.5), ReleaseAction::Snap);
    assert_eq!(release_action(0, 8, 4.0), ReleaseAction::Snap);
    assert_eq!(release_action(6, 8, 4.0), ReleaseAction::Snap);
    assert_eq!(release_action(7, 8, 4.0), ReleaseAction::Snap);
    // selection == count - 3 is still interior; count - 2 (above) is the edge.
    assert_eq!(
        release_action(5, 8, 4.0),
        ReleaseAction::Decay { velocity: 4.0 }
    );

    assert_eq!(
        release_action(3, 8, 4.0),
        ReleaseAction::Decay { velocity: 4.0 }
    );
    assert_eq!(
        release_action(3, 8, -4.0),
        ReleaseAction::Decay { velocity: -4.0 }
    );
    // Launch speed clamps into [3, 5].
    assert_eq!(
        release_action(3, 8, 1.5),
        ReleaseAction::Decay { velocity: 3.0 }
    );
    assert_eq!(
        release_action(3, 8, -40.0),
        ReleaseAction::Decay { velocity: -5.0 }
    );
}

#[test]
fn pixel_conversions_invert_sign_and_scale_by_sensitivity() {
    assert!(approx(drag_delta_to_position(60.0, Sensitivity::Normal), -1.0));
    assert!(approx(drag_delta_to_position(-120.0, Sensitivity::Low), 1.0));
    assert!(approx(drag_delta_to_position(-40.0, Sensitivity::High), 1.0));
    assert!(approx(
        release_velocity_to_position(80.0, Sensitivity::High),
        -2.0
    ));
}

#[test]
fn sensitivity_scales_drag_travel() {
    let changes: Fired = Arc::new(Mutex::new(Vec::new()));
    let c = Arc::clone(&changes);
    let mut cf = Coverflow::new(
        CoverflowOptions::new(8, move |i| c.lock().unwrap().push(i))
            .with_sensitivity(Sensitivity::High)
            .with_initial_selection(3),
    );
    cf.set_container_width(320);
    cf.drag_start();
    cf.drag_move(-40.0);
    assert!(approx(cf.scroll_position(), 4.0));
}

#[test]
fn fast_deceleration_settles_sooner() {
    let run = |deceleration: Deceleration| {
        let mut cf = Coverflow::new(
            CoverflowOptions::new(20, |_| {})
                .with_deceleration(deceleration)
                .with_initial_selection(5),
        );
        cf.set_container_width(320);
        cf.drag_start();
        cf.drag_move(-30.0);
        cf.drag_release(-240.0);

        let mut now_ms = 0;
        while cf.animation_state() == AnimationState::Decaying {
            now_ms += 16;
            cf.tick(now_ms);
            assert!(now_ms < 60_000, "decay never settled");
        }
        (now_ms, cf.scroll_position())
    };

    let (normal_ms, normal_end) = run(Deceleration::Normal);
    let (fast_ms, fast_end) = run(Deceleration::Fast);
    assert!(fast_ms < normal_ms);
    assert!(fast_end < normal_end);
}
