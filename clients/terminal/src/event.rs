use color_eyre::eyre::WrapErr;
use ratatui::crossterm::{
    event::{
        self, Event as CrosstermEvent, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::supports_keyboard_enhancement,
};
use std::{
    io::stdout,
    sync::mpsc,
    thread,
    time::{Duration, Instant},
};

/// Representation of all possible events.
#[derive(Clone, Debug)]
pub enum Event {
    /// Emitted once per game tick, at the configured fps
    Tick,
    /// Crossterm events (keyboard, resize, ...)
    Crossterm(CrosstermEvent),
}

/// Terminal event handler with enhanced keyboard support
pub struct EventHandler {
    /// Event receiver channel
    receiver: mpsc::Receiver<Event>,
    /// Whether key release events are reported
    keyboard_enhanced: bool,
}

impl EventHandler {
    /// Start the event thread, ticking `fps` times per second
    pub fn new(fps: u16) -> color_eyre::Result<Self> {
        let (sender, receiver) = mpsc::channel();

        let keyboard_enhanced = matches!(supports_keyboard_enhancement(), Ok(true));
        if keyboard_enhanced {
            execute!(
                stdout(),
                PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                        | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                )
            )
            .wrap_err("failed to enable keyboard enhancement")?;
        }

        let actor = EventThread::new(sender, fps);
        thread::spawn(move || {
            if let Err(e) = actor.run() {
                tracing::error!("event thread stopped: {e:#}");
            }
        });

        Ok(Self {
            receiver,
            keyboard_enhanced,
        })
    }

    /// Whether the terminal reports key releases
    pub fn keyboard_enhanced(&self) -> bool {
        self.keyboard_enhanced
    }

    /// Receives an event from the sender (blocking)
    pub fn next(&self) -> color_eyre::Result<Event> {
        self.receiver
            .recv()
            .wrap_err("event thread disconnected")
    }
}

impl Drop for EventHandler {
    fn drop(&mut self) {
        if self.keyboard_enhanced {
            let _ = execute!(stdout(), PopKeyboardEnhancementFlags);
        }
    }
}

/// A thread that reads crossterm events and paces the game with tick events
struct EventThread {
    sender: mpsc::Sender<Event>,
    tick_interval: Duration,
}

impl EventThread {
    fn new(sender: mpsc::Sender<Event>, fps: u16) -> Self {
        Self {
            sender,
            tick_interval: tick_interval(fps),
        }
    }

    fn run(self) -> color_eyre::Result<()> {
        let mut last_tick = Instant::now();

        loop {
            let timeout = self.tick_interval.saturating_sub(last_tick.elapsed());
            if timeout == Duration::ZERO {
                last_tick = Instant::now();
                if !self.send(Event::Tick) {
                    return Ok(());
                }
                continue;
            }

            if event::poll(timeout).wrap_err("failed to poll for crossterm events")? {
                let event = event::read().wrap_err("failed to read crossterm event")?;
                if !self.send(Event::Crossterm(event)) {
                    return Ok(());
                }
            }
        }
    }

    /// False once the receiving side is gone
    fn send(&self, event: Event) -> bool {
        self.sender.send(event).is_ok()
    }
}

/// Time between ticks at `fps` ticks per second
fn tick_interval(fps: u16) -> Duration {
    Duration::from_secs_f64(1.0 / f64::from(fps.max(1)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_interval() {
        assert_eq!(tick_interval(50), Duration::from_millis(20));
        assert_eq!(tick_interval(1), Duration::from_secs(1));
        // zero is treated as one tick per second rather than dividing by zero
        assert_eq!(tick_interval(0), Duration::from_secs(1));
    }
}
