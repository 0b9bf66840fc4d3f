// Example: a fast flick through the interior, decaying and then snapping onto an index.
use coverflow::{AnimationState, Coverflow, CoverflowOptions};

fn main() {
    let mut cf = Coverflow::new(
        CoverflowOptions::new(12, |i| println!("selection -> {i}")).with_initial_selection(4),
    );
    cf.set_container_width(480);

    cf.drag_start();
    for dx in [-15.0, -40.0, -70.0] {
        cf.drag_move(dx);
        println!("drag: position={:.3}", cf.scroll_position());
    }
    cf.drag_release(-300.0); // 5 position units/s once converted

    let mut now_ms = 0;
    while let Some(pos) = cf.tick(now_ms) {
        if now_ms % 160 == 0 {
            println!("{now_ms:5} ms  {:?}  position={pos:.3}", cf.animation_state());
        }
        now_ms += 16;
    }
    assert_eq!(cf.animation_state(), AnimationState::Idle);
    println!("settled at {} (selection {})", cf.scroll_position(), cf.selection());
}
