//! Interactive countdown session.
//!
//! One current-thread runtime owns the controller. Stdin lines and ticks
//! arrive on the same loop, so every transition runs to completion before
//! the next one starts.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use clap::Args;
use countdown_core::sinks::{NullView, Silent};
use countdown_core::{
    AudioSink, Command, Config, DurationInput, Event, FlashSink, FlashTimeline, IntervalTicker,
    Phase, TimerController, TimerView,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::time::Instant;

use crate::alerts::{self, Chime, TerminalFlash};
use crate::keys::{self, Action};
use crate::terminal::TerminalView;

#[derive(Args)]
pub struct RunArgs {
    /// Initial minutes (overrides timer.default_minutes)
    #[arg(short, long)]
    minutes: Option<String>,
    /// Initial seconds (overrides timer.default_seconds)
    #[arg(short, long)]
    seconds: Option<String>,
    /// Start counting immediately
    #[arg(long)]
    start: bool,
    /// Print events as JSON lines instead of the live display
    #[arg(long)]
    json: bool,
    /// Disable the completion tone
    #[arg(long)]
    no_sound: bool,
    /// Disable the completion flash
    #[arg(long)]
    no_flash: bool,
}

pub fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(session(args, config));
    // The stdin reader thread may still be parked in a read.
    runtime.shutdown_timeout(Duration::from_millis(100));
    alerts::restore_terminal();
    result
}

/// Output side of a session: what gets printed for each event.
struct Output {
    json: bool,
}

impl Output {
    fn event(&self, event: Option<Event>) -> Result<(), serde_json::Error> {
        if let (true, Some(event)) = (self.json, event) {
            println!("{}", serde_json::to_string(&event)?);
        }
        Ok(())
    }

    fn message(&self, text: &str) {
        if self.json {
            eprintln!("{text}");
        } else {
            println!("\n{text}");
        }
    }
}

async fn session(args: RunArgs, config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut fields = config.initial_input();
    if let Some(minutes) = &args.minutes {
        fields.set_minutes(minutes.as_str());
    }
    if let Some(seconds) = &args.seconds {
        fields.set_seconds(seconds.as_str());
    }
    let input = Rc::new(RefCell::new(fields));

    let view: Box<dyn TimerView> = if args.json {
        Box::new(NullView)
    } else {
        Box::new(TerminalView::stdout())
    };
    // Escape codes would corrupt JSON output, so the flash is a display-only
    // effect.
    let flash_on = config.flash.enabled && !args.no_flash && !args.json;
    let sound_on = config.sound.enabled && !args.no_sound;

    let mut linger = Duration::ZERO;
    let flash: Box<dyn FlashSink> = if flash_on {
        let timeline = FlashTimeline::from(&config.flash);
        linger = linger.max(timeline.total());
        Box::new(TerminalFlash::new(timeline))
    } else {
        Box::new(Silent)
    };
    let audio: Box<dyn AudioSink> = if sound_on {
        let chime = Chime::new(config.sound.clone());
        linger = linger.max(chime.playback_time());
        Box::new(chime)
    } else {
        Box::new(Silent)
    };

    let (tick_tx, mut ticks) = mpsc::unbounded_channel();
    let mut controller = TimerController::new(
        input.clone(),
        view,
        flash,
        audio,
        IntervalTicker::new(tick_tx),
    );

    let out = Output { json: args.json };
    out.event(controller.dispatch(Command::InputChanged))?;
    if args.start {
        out.event(controller.dispatch(Command::Start))?;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let mut alerts_until = None;

    loop {
        // With stdin gone nothing can pause or reset, so stay only while
        // there is a countdown to finish.
        if !stdin_open && controller.phase() != Phase::Running {
            break;
        }

        tokio::select! {
            Some(id) = ticks.recv() => {
                let event = controller.dispatch(Command::Tick(id));
                if matches!(event, Some(Event::TimerCompleted { .. })) {
                    alerts_until = Some(Instant::now() + linger);
                }
                out.event(event)?;
            }
            line = lines.next_line(), if stdin_open => {
                let Some(line) = line? else {
                    stdin_open = false;
                    continue;
                };
                match keys::parse(&line) {
                    Ok(Action::Quit) => break,
                    Ok(Action::Help) => out.message(keys::HELP),
                    Ok(Action::Status) => {
                        println!("{}", serde_json::to_string(&controller.snapshot())?);
                    }
                    Ok(Action::Dispatch(command)) => out.event(controller.dispatch(command))?,
                    Ok(Action::SetMinutes(text)) => {
                        input.borrow_mut().set_minutes(text);
                        out.event(controller.dispatch(Command::InputChanged))?;
                    }
                    Ok(Action::SetSeconds(text)) => {
                        input.borrow_mut().set_seconds(text);
                        out.event(controller.dispatch(Command::InputChanged))?;
                    }
                    Ok(Action::SetDuration { minutes, seconds }) => {
                        *input.borrow_mut() = DurationInput::new(minutes, seconds);
                        out.event(controller.dispatch(Command::InputChanged))?;
                    }
                    Err(e) => out.message(&format!("{e} (type 'help')")),
                }
            }
            else => break,
        }
    }

    // Let a just-fired flash and tone play out before the process exits.
    if let Some(until) = alerts_until {
        tokio::time::sleep_until(until).await;
    }
    if !args.json {
        println!();
    }
    Ok(())
}
