use chrono::NaiveDate;

pub fn run(
    pool: &str,
    amount: u32,
    as_of: Option<NaiveDate>,
) -> Result<(), Box<dyn std::error::Error>> {
    let engine = super::open_engine(as_of)?;
    let snapshot = engine.consume(pool, amount)?;
    if let Some(state) = snapshot.pools.get(pool) {
        println!("{pool}: {}/{}", state.level, state.capacity);
    }
    Ok(())
}
