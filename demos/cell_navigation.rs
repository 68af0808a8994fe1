//! Cell Navigation Example
//!
//! Encodes a few cities, walks to neighbouring cells, and moves up and down
//! the precision hierarchy. Run with `RUST_LOG=debug` to see batch logging.

use spatio_geohash::{Geohash, Half, Point, Quarter, Tiebreak, encode_points, parse_geohashes};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    println!("=== Variable-Precision Geohash Navigation ===\n");

    // === Example 1: Encoding ===
    println!("1. Encoding cities at precision 20");
    let cities = [
        ("San Francisco", Point::new(-122.4194, 37.7749)),
        ("New York", Point::new(-74.0060, 40.7128)),
        ("Sydney", Point::new(151.2093, -33.8688)),
        ("Reykjavik", Point::new(-21.9426, 64.1466)),
    ];
    let points: Vec<Point> = cities.iter().map(|(_, p)| *p).collect();
    let cells = encode_points(&points, 20)?;
    for ((name, _), cell) in cities.iter().zip(&cells) {
        let bounds = cell.bounds();
        println!(
            "   {:<14} {:>10}  {:.0}m x {:.0}m (aspect {:.2})",
            name,
            cell,
            bounds.height_meters(),
            bounds.width_meters(),
            bounds.aspect_ratio()
        );
    }

    // === Example 2: Neighbours ===
    let sf = cells[0];
    println!("\n2. Neighbours of {}", sf);
    if let Some(north) = sf.shift_north(Tiebreak::West) {
        println!("   north: {}", north.to_debug_string());
    }
    if let Some(south) = sf.shift_south(Tiebreak::West) {
        println!("   south: {}", south.to_debug_string());
    }
    println!("   east:  {}", sf.shift_east().to_debug_string());
    println!("   west:  {}", sf.shift_west().to_debug_string());
    println!("   {} cells touch it", sf.adjacent().len());

    // === Example 3: Hierarchy ===
    println!("\n3. Zooming out to the whole earth");
    let mut current = sf;
    while let Some(parent) = current.zoom_out() {
        if parent.precision() % 5 == 0 {
            println!("   precision {:>2}: {}", parent.precision(), parent);
        }
        current = parent;
    }
    let child = sf
        .zoom_in(Half::North, Quarter::MiddleEast)
        .ok_or("no finer cell")?;
    println!("   one level finer: {} (precision {})", child, child.precision());

    // === Example 4: Antimeridian ===
    println!("\n4. Query crossing the antimeridian");
    let fiji = Geohash::value_of(-17.7134, 178.0650, 12)?;
    println!(
        "   {} intersects [170E, 170W]: {}",
        fiji,
        fiji.intersects(-20.0, 170.0, -15.0, -170.0)?
    );

    // === Example 5: Parsing ===
    println!("\n5. Parsing text");
    let parsed = parse_geohashes(["3", "y", "6mdjxx4jx"])?;
    for cell in parsed {
        println!("   {:>10} -> precision {}", cell, cell.precision());
    }
    if let Err(e) = "6mdjxx4ja".parse::<Geohash>() {
        println!("   rejected: {}", e);
    }

    println!("\n=== Done ===");
    Ok(())
}
