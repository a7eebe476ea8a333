use countdown_core::TimeDisplay;

pub fn run(secs: u64) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", TimeDisplay::from_secs(secs));
    Ok(())
}
