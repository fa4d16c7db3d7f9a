use std::time::Duration;

use loop_scroll::{
    Easing, ItemTemplate, ItemView, LoopScroll, LoopScrollOptions, Padding, Size, Vec2,
};
use tracing_subscriber::EnvFilter;

/// Stand-in for a framework widget.
#[derive(Debug, Default)]
struct Label {
    text: String,
    visible: bool,
    position: Vec2,
}

impl ItemView for Label {
    fn set_active(&mut self, active: bool) {
        self.visible = active;
    }

    fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }
}

fn main() {
    // RUST_LOG=loop_scroll=trace shows every pass.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let template = ItemTemplate::new(Size::new(320.0, 48.0), Label::default);
    let options = LoopScrollOptions::new(template)
        .with_spacing(4.0)
        .with_padding(Padding::uniform(8.0))
        .with_scroll_to(Easing::EaseOutCubic, Duration::from_millis(300));

    let mut list = LoopScroll::new(options, |label: &mut Label, index| {
        label.text = format!("row #{index}");
    });
    list.set_viewport_size(Size::new(320.0, 480.0));
    if let Err(err) = list.provide_data(10_000) {
        eprintln!("cannot populate the list: {err}");
        return;
    }
    list.layout();
    list.end_of_pass();
    println!("content_size={:?}", list.content_size());
    println!("visible_range={:?}", list.visible_range());

    // The container scrolls by user input.
    for step in 1..=5 {
        list.on_scroll(Vec2::new(0.0, step as f32 * 130.0));
        list.layout();
        list.end_of_pass();
        println!(
            "offset={:>6.1} range={:?} stats={:?}",
            list.scroll_offset().y,
            list.visible_range(),
            list.stats()
        );
    }

    // Animated jump, driven at 60 fps.
    list.scroll_to(5_000, false);
    let frame = Duration::from_micros(16_667);
    while let Some(offset) = list.tick(frame) {
        list.layout();
        list.end_of_pass();
        if !list.is_animating() {
            println!("arrived at offset={:.1}", offset.y);
        }
    }

    if let Some(first) = list.visible_range().and_then(|r| list.active_item(r.start)) {
        println!("first visible: {:?}", first);
    }
    println!("final stats={:?}", list.stats());
}
