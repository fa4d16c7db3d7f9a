use loop_scroll::{
    Align, Constraint, ItemTemplate, ItemView, Layout, LoopScroll, LoopScrollOptions, Size, Vec2,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default)]
struct Tile {
    index: Option<usize>,
    shown: bool,
    position: Vec2,
}

impl ItemView for Tile {
    fn set_active(&mut self, active: bool) {
        self.shown = active;
    }

    fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }
}

/// One frame of the hosting framework: layout, then the end-of-pass hook.
fn frame(grid: &mut LoopScroll<Tile>) {
    grid.layout();
    grid.end_of_pass();
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let options = LoopScrollOptions::new(ItemTemplate::new(Size::new(96.0, 96.0), Tile::default))
        .with_layout(Layout::grid(Constraint::FixedColumnCount(4)))
        .with_spacing(8.0)
        .with_alignment(Align::Center, Align::Start);

    let mut grid = LoopScroll::new(options, |tile: &mut Tile, index| tile.index = Some(index));
    grid.set_viewport_size(Size::new(480.0, 600.0));
    if let Err(err) = grid.provide_data(1_000) {
        eprintln!("cannot populate the grid: {err}");
        return;
    }
    frame(&mut grid);

    grid.scroll_to(400, true);
    frame(&mut grid);
    println!(
        "before reload: first={} range={:?}",
        grid.first_visible_index(),
        grid.visible_range()
    );

    // Data set shrinks: the first visible index survives the reload.
    for count in [600, 2_000, 120] {
        if let Err(err) = grid.provide_data(count) {
            eprintln!("reload failed: {err}");
            return;
        }
        frame(&mut grid);
        frame(&mut grid);
        println!(
            "count={count:>5} first={} range={:?} stats={:?}",
            grid.first_visible_index(),
            grid.visible_range(),
            grid.stats()
        );
    }

    if let Some(tile) = grid.active_item(grid.first_visible_index()) {
        println!("first tile: {:?}", tile);
    }
}
