use geotrie::{GeoIndex, Point, cell_bounds};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    println!("Geotrie - Getting Started");
    println!("=========================");

    let index = GeoIndex::builder().min_prefix_len(1).build()?;

    let cities = [
        ("San Francisco", Point::new(-122.4194, 37.7749)),
        ("Oakland", Point::new(-122.2711, 37.8044)),
        ("San Jose", Point::new(-121.8863, 37.3382)),
        ("New York", Point::new(-74.0060, 40.7128)),
        ("London", Point::new(-0.1278, 51.5074)),
    ];

    println!("\nIndexing cities");
    for (name, point) in &cities {
        let code = index.add(*point)?;
        println!("  {:<14} -> {}", name, code);
    }

    let sf_code = index.hash(&cities[0].1)?;
    println!("\nExact lookup of {}: {:?}", sf_code, index.position(&sf_code)?);

    for prefix in ["9", "9Q", "9Q9"] {
        let cell = cell_bounds(prefix)?;
        let entries = index.find_by_prefix(prefix)?;
        println!(
            "\nCell {:<4} lon [{:.3}, {:.3}] lat [{:.3}, {:.3}]: {} codes",
            prefix,
            cell.min().x,
            cell.max().x,
            cell.min().y,
            cell.max().y,
            entries.len()
        );
        for entry in entries {
            println!("  {} ({} points)", entry.code(), entry.point_count());
        }
    }

    let km = index.distance(&cities[0].1, &cities[3].1)? / 1000.0;
    println!("\nSan Francisco to New York: {:.0} km", km);

    index.delete(&sf_code)?;
    println!("\nAfter deleting {}: {:?}", sf_code, index.stats());

    Ok(())
}
