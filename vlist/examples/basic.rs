use vlist::{HeightList, ListOptions};

fn main() -> Result<(), vlist::ConfigError> {
    let mut list = HeightList::new(ListOptions::new(50.0, 3))?;
    list.set_items(0u64..100_000);
    list.set_viewport_height(500.0);
    list.set_scroll_offset(123_456.0);

    let plan = list.render_plan();
    println!("total_height={}", plan.total_height);
    println!("window={}..{}", plan.start_index, plan.end_index);
    println!("offset_top={}", plan.offset_top);

    list.set_scroll_offset_clamped(f64::MAX);
    println!("at bottom: offset={} window={:?}", list.scroll_offset(), list.window());
    Ok(())
}
