// Example: feeding post-layout measurements back until the window settles.
use vlist::{HeightList, ListOptions};

/// Stand-in for a layout engine: the "real" height of each row.
fn laid_out_height(key: u32) -> f64 {
    40.0 + f64::from(key % 7) * 25.0
}

fn main() -> Result<(), vlist::ConfigError> {
    let mut list = HeightList::new(ListOptions::new(50.0, 2).with_initial_viewport_height(400.0))?;
    list.set_items(0u32..1_000);

    let mut pass = 0;
    while list.take_dirty() {
        pass += 1;
        let plan = list.render_plan();
        println!(
            "pass {pass}: window={}..{} offset_top={} total={}",
            plan.start_index, plan.end_index, plan.offset_top, plan.total_height
        );

        // Render, then measure what was rendered.
        let mut rendered = Vec::new();
        list.for_each_rendered_item(|it| rendered.push(it.key));
        list.measure_many(rendered.into_iter().map(|k| (k, laid_out_height(k))));
    }
    println!("settled after {pass} passes; {} heights known", list.ledger().len());
    Ok(())
}
