//! Builds a two-column settings menu with a scrolling list and prints its
//! structure.
//!
//! Run with `RUST_LOG=framepack=debug` to see the layout passes.

use framepack::{
    describe_tree, Axis, DebugOptions, FrameConfig, LayoutDefaults, Menu, MenuConfig, Point, Spacing,
    WidgetConfig,
};

fn main() -> framepack::Result<()> {
    env_logger::init();

    let defaults = LayoutDefaults::default()
        .with_padding(Spacing::symmetric(8.0, 4.0))
        .with_scrollbar_thickness(12.0);
    let mut menu = Menu::new(MenuConfig::new(640.0, 360.0, defaults.clone()).with_columns(2));

    let title = WidgetConfig::new(&defaults).with_name("title").with_size_px(200.0, 32.0);
    menu.add_widget(title)?;

    let list = menu.add_frame(
        FrameConfig::vertical(280.0, 600.0, &defaults)
            .with_max_height(240.0)
            .with_name("resolutions"),
    )?;
    for (width, height) in [(640, 480), (800, 600), (1024, 768), (1280, 720), (1920, 1080)] {
        let option = WidgetConfig::new(&defaults)
            .with_name(format!("{width}x{height}"))
            .with_size_px(240.0, 48.0);
        menu.pack_widget(option, list)?;
    }
    menu.pack_widget(WidgetConfig::vertical_spacer(24.0, &defaults)?, list)?;

    let row = menu.create_frame(FrameConfig::horizontal(280.0, 60.0, &defaults).with_name("buttons"))?;
    menu.add(row)?;
    for name in ["apply", "back"] {
        menu.pack_widget(WidgetConfig::new(&defaults).with_name(name).with_size_px(100.0, 40.0), row)?;
    }

    for _ in 0..4 {
        menu.select_next()?;
    }
    if let Some(selected) = menu.selected() {
        println!("selected: {}", menu.widget(selected).and_then(|w| w.name()).map_or("-", |n| n.as_str()));
    }
    println!("scroll range: {:?}", menu.scroll_range(list, Axis::Y));
    println!("hit at (40, 100): {:?}", menu.hit_test(Point::new(40.0, 100.0)));
    print!("{}", describe_tree(&menu, DebugOptions::all().with_ids(false)));
    Ok(())
}
