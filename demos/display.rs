use pixprobe::{DpiContext, cursor_position, display_at_point, displays, virtual_screen};

fn main() -> pixprobe::Result<()> {
    let dpi = DpiContext::initialize()?;
    println!("DPI awareness: {:?}", dpi.awareness());
    println!("Coordinate space: {:?}", dpi.coordinate_space());

    let all = displays()?;
    println!("Displays ({})", all.len());
    for display in &all {
        println!(
            "  #{} {:?} scale {:.2}{}",
            display.id,
            display.bounds,
            display.scale_factor,
            if display.is_primary { " (primary)" } else { "" }
        );
    }

    println!("Virtual screen: {:?}", virtual_screen()?);

    let cursor = cursor_position()?;
    match display_at_point(cursor)? {
        Some(display) => println!("Cursor {cursor} is on display #{}", display.id),
        None => println!("Cursor {cursor} is outside every display"),
    }

    Ok(())
}
