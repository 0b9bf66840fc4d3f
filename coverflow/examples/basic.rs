// Example: minimal usage and programmatic selection.
use coverflow::{Coverflow, CoverflowOptions};

fn main() {
    let mut cf = Coverflow::new(CoverflowOptions::new(7, |i| println!("selection -> {i}")));
    cf.set_container_width(320);

    let mut items = Vec::new();
    cf.collect_items(&mut items);
    println!("paint order at selection 0:");
    for it in &items {
        println!(
            "  item {}: translate_x={:+7.1} scale={:.2} rotate_y={:+5.1}",
            it.index, it.transform.translate_x, it.transform.scale, it.transform.rotate_y
        );
    }

    cf.select(4);
    let mut now_ms = 0;
    while cf.tick(now_ms).is_some() {
        now_ms += 16;
    }
    println!(
        "settled at {} after {now_ms} ms (selection {})",
        cf.scroll_position(),
        cf.selection()
    );
}
