use countdown_core::{AudioSink, Config};

use crate::alerts::Chime;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mut chime = Chime::new(config.sound);
    // Unlike a completion, an explicit test of the tone reports failures.
    chime.chime()?;
    std::thread::sleep(chime.playback_time());
    Ok(())
}
