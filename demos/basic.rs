// Example: minimal two-section layout and a viewport region query.
use waterfall::{ElementKind, Rect, Size, Waterfall, WaterfallOptions};

fn main() {
    // Two sections of photo-like items with varying aspect ratios.
    let opts = WaterfallOptions::new(
        2,
        |_section| 12,
        |section, item| {
            let aspect = 0.6 + ((section * 7 + item * 3) % 8) as f64 / 10.0;
            Size::new(400.0, 400.0 * aspect)
        },
    )
    .with_column_count(3)
    .with_header_height(44.0)
    .with_footer_height(24.0)
    .with_initial_viewport(Some(Rect::new(0.0, 0.0, 390.0, 844.0)));

    let mut layout = Waterfall::new(opts).expect("valid configuration");

    println!("content_size={:?}", layout.content_size());
    println!("item_width={}", layout.item_width_in_section(0));
    println!(
        "header_0={:?}",
        layout
            .attributes_for_supplementary(ElementKind::SectionHeader, 0)
            .map(|a| a.frame)
    );

    // A render loop would query whatever the viewport currently shows.
    let viewport = Rect::new(0.0, 600.0, 390.0, 844.0);
    let mut visible = Vec::new();
    layout.collect_attributes_in_rect(viewport, &mut visible);
    println!("visible={} first={:?}", visible.len(), visible.first());
}
