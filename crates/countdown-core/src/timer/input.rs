use std::cell::RefCell;
use std::rc::Rc;

/// Where the controller reads the configured duration from.
///
/// Implementations never fail: anything unset or unparsable reads as 0.
pub trait InputSource {
    fn minutes(&self) -> u32;
    fn seconds(&self) -> u32;
}

/// Raw text of the minutes and seconds fields, as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DurationInput {
    minutes: String,
    seconds: String,
}

impl DurationInput {
    pub fn new(minutes: impl Into<String>, seconds: impl Into<String>) -> Self {
        Self {
            minutes: minutes.into(),
            seconds: seconds.into(),
        }
    }

    pub fn from_values(minutes: u32, seconds: u32) -> Self {
        Self::new(minutes.to_string(), seconds.to_string())
    }

    pub fn set_minutes(&mut self, text: impl Into<String>) {
        self.minutes = text.into();
    }

    pub fn set_seconds(&mut self, text: impl Into<String>) {
        self.seconds = text.into();
    }
}

impl InputSource for DurationInput {
    fn minutes(&self) -> u32 {
        parse_field(&self.minutes)
    }

    fn seconds(&self) -> u32 {
        parse_field(&self.seconds)
    }
}

/// Shared input: the front end edits the fields while the controller reads
/// them.
impl<T: InputSource> InputSource for Rc<RefCell<T>> {
    fn minutes(&self) -> u32 {
        self.borrow().minutes()
    }

    fn seconds(&self) -> u32 {
        self.borrow().seconds()
    }
}

/// Leading-digits parse: `"12abc"` and `"+12"` read as 12, `"abc"`, `""`
/// and `"-3"` as 0.
fn parse_field(text: &str) -> u32 {
    let text = text.trim();
    let unsigned = text.strip_prefix('+').unwrap_or(text);
    let digits: String = unsigned
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    // Too many digits for u32 saturates rather than zeroing.
    match digits.parse::<u32>() {
        Ok(n) => n,
        Err(_) if !digits.is_empty() => u32::MAX,
        Err(_) => 0,
    }
}
