use std::collections::HashMap;

use vlist::ListOptions;
use vlist_adapter::{Controller, ControllerOptions, Origin};

fn main() {
    // A fake host: rendered heights live in a map that grows as a reply streams in.
    let mut heights: HashMap<u32, f64> = HashMap::new();
    let mut feed: Vec<(u32, Origin)> = Vec::new();

    let mut c = Controller::new(ListOptions::new(60.0, 2), ControllerOptions::default())
        .expect("valid options");
    c.mount(480.0);

    for id in 0..30u32 {
        let origin = if id % 2 == 0 { Origin::User } else { Origin::Assistant };
        feed.push((id, origin));
        heights.insert(id, 40.0 + f64::from(id % 5) * 20.0);
    }

    let mut now_ms = 0u64;
    c.sync_items(&feed);
    c.after_layout(&mut |k: &u32| heights.get(k).copied(), now_ms);

    // The assistant reply appears, then grows for a while.
    feed.push((30, Origin::Assistant));
    heights.insert(30, 24.0);
    c.sync_items(&feed);

    for _ in 0..40 {
        now_ms += 16;
        if let Some(h) = heights.get_mut(&30) {
            *h += 6.0;
        }
        let pass = c.after_layout(&mut |k: &u32| heights.get(k).copied(), now_ms);
        let off = c.tick(now_ms).or(pass.scroll_to);
        if let Some(plan) = c.poll_render() {
            println!(
                "t={now_ms} off={off:?} items={}..{} total={} bottom_gap={}",
                plan.start_index,
                plan.end_index,
                plan.total_height,
                c.list().distance_to_bottom()
            );
        }
    }
}
