use chrono::NaiveDate;

pub fn run(json: bool, as_of: Option<NaiveDate>) -> Result<(), Box<dyn std::error::Error>> {
    let engine = super::open_engine(as_of)?;
    let snapshot = engine.snapshot();

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    println!("Progression as of {}", snapshot.as_of);

    println!("\nStreaks:");
    for (metric, streak) in &snapshot.streaks {
        println!(
            "  {metric:<10} current {:>3}  best {:>3}",
            streak.current, streak.max
        );
    }

    println!("\nPools:");
    for (pool, state) in &snapshot.pools {
        println!("  {pool:<10} {:>3}/{}", state.level, state.capacity);
    }

    println!("\nUnlocks:");
    for (collection, ids) in &snapshot.unlocks {
        let list = if ids.is_empty() {
            "-".to_string()
        } else {
            ids.iter().cloned().collect::<Vec<_>>().join(", ")
        };
        println!("  {collection:<20} {list}");
    }

    Ok(())
}
