// Example: a touch session driven through the controller, first a tap, then a drag.
use coverflow::CoverflowOptions;
use coverflow_adapter::Controller;

fn main() {
    let mut ctl = Controller::new(
        CoverflowOptions::new(9, |i| println!("selection -> {i}"))
            .with_on_press(Some(|i| println!("pressed item {i}")))
            .with_initial_selection(3),
    );
    ctl.on_layout(360);

    // A short touch on the centered item: never crosses the claim threshold, so it's a tap.
    ctl.on_touch_down(Some(3));
    ctl.on_touch_move(4.0);
    ctl.on_touch_up(0.0);

    // A drag: claims after ~10 px, then follows the finger and settles on release.
    ctl.on_touch_down(Some(3));
    for dx in [-8.0, -16.0, -48.0, -95.0] {
        ctl.on_touch_move(dx);
    }
    ctl.on_touch_up(-40.0);

    let mut now_ms = 0;
    while ctl.tick(now_ms).is_some() {
        now_ms += 16;
    }
    println!(
        "settled at {} (selection {})",
        ctl.coverflow().scroll_position(),
        ctl.coverflow().selection()
    );
}
