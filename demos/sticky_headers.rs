// Example: plain-style sticky headers across a scroll sequence.
use waterfall::{ElementKind, Rect, Size, Style, Waterfall, WaterfallOptions};

fn main() {
    let opts = WaterfallOptions::new(3, |_| 6, |_, _| Size::new(300.0, 220.0))
        .with_header_height(40.0)
        .with_style(Style::Plain)
        .with_initial_viewport(Some(Rect::new(0.0, 0.0, 320.0, 480.0)));

    let mut layout = Waterfall::new(opts).expect("valid configuration");
    layout.prepare();
    println!("content_size={:?}", layout.content_size());

    // Simulate the host scrolling; each viewport change only re-resolves the
    // sticky header, it never re-runs the layout pass.
    for step in 0..12 {
        let bounds = Rect::new(0.0, step as f64 * 90.0, 320.0, 480.0);
        layout.set_viewport(bounds);

        match layout.sticky_overlay() {
            Some(overlay) => {
                let header = layout
                    .attributes_for_supplementary(ElementKind::SectionHeader, overlay.section)
                    .expect("stuck header has attributes");
                println!(
                    "y={:>4}: section {} header pinned at y={} (z={})",
                    bounds.y,
                    overlay.section,
                    header.frame.y + header.transform.dy,
                    header.z_index,
                );
            }
            None => println!("y={:>4}: no header stuck", bounds.y),
        }
    }
}
