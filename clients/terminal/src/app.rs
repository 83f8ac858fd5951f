use crate::event::{Event, EventHandler};
use pong_core::{CommandList, GameSession, InputEvent, Key, Outcome};
use ratatui::{
    crossterm::event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    DefaultTerminal,
};

/// How long a tapped key counts as held when the terminal can't report
/// releases. Covers the usual delay before key auto-repeat kicks in.
const TAP_HOLD_SECS: f32 = 0.55;

fn map_keycode_to_key(code: KeyCode) -> Key {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Key::Up,
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        _ => Key::Other,
    }
}

fn is_quit_key(event: &KeyEvent) -> bool {
    match event.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') | KeyCode::Char('C') => event.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Keyboard capability of the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyboardMode {
    /// Press and release are both reported
    Enhanced,
    /// Only presses (and auto-repeats) arrive; releases are synthesized
    TapHold,
}

/// Turns crossterm key events into game input events
#[derive(Debug)]
pub struct KeyTranslator {
    mode: KeyboardMode,
    hold_ticks: u32,
    /// Ticks left before the synthetic release of Up / Down
    up_held: u32,
    down_held: u32,
}

impl KeyTranslator {
    pub fn new(mode: KeyboardMode, fps: u16) -> Self {
        let hold_ticks = (TAP_HOLD_SECS * f32::from(fps)).ceil().max(1.0) as u32;
        Self {
            mode,
            hold_ticks,
            up_held: 0,
            down_held: 0,
        }
    }

    pub fn mode_description(&self) -> &'static str {
        match self.mode {
            KeyboardMode::Enhanced => "Enhanced (Hold keys)",
            KeyboardMode::TapHold => "Tap (Hold or tap keys)",
        }
    }

    /// Events caused by one key event
    pub fn translate(&mut self, event: KeyEvent) -> Vec<InputEvent> {
        if event.kind == KeyEventKind::Press && is_quit_key(&event) {
            return vec![InputEvent::Quit];
        }

        let key = map_keycode_to_key(event.code);
        match self.mode {
            KeyboardMode::Enhanced => match event.kind {
                KeyEventKind::Press => vec![InputEvent::KeyDown(key)],
                KeyEventKind::Release => vec![InputEvent::KeyUp(key)],
                KeyEventKind::Repeat => Vec::new(),
            },
            KeyboardMode::TapHold => {
                if event.kind != KeyEventKind::Press {
                    return Vec::new();
                }
                self.tap(key)
            }
        }
    }

    /// Advance one tick; yields the synthetic releases that fall due
    pub fn tick(&mut self) -> Vec<InputEvent> {
        let mut released = Vec::new();
        for (key, held) in [(Key::Up, &mut self.up_held), (Key::Down, &mut self.down_held)] {
            if *held > 0 {
                *held -= 1;
                if *held == 0 {
                    released.push(InputEvent::KeyUp(key));
                }
            }
        }
        released
    }

    fn tap(&mut self, key: Key) -> Vec<InputEvent> {
        let hold_ticks = self.hold_ticks;
        let (held, other_held, other) = match key {
            Key::Up => (&mut self.up_held, &mut self.down_held, Key::Down),
            Key::Down => (&mut self.down_held, &mut self.up_held, Key::Up),
            _ => return vec![InputEvent::KeyDown(key), InputEvent::KeyUp(key)],
        };

        let mut events = Vec::new();
        // Switching direction releases the other key first
        if *other_held > 0 {
            *other_held = 0;
            events.push(InputEvent::KeyUp(other));
        }
        if *held == 0 {
            events.push(InputEvent::KeyDown(key));
        }
        *held = hold_ticks;
        events
    }
}

/// Main application
pub struct App {
    /// Is the application running?
    pub running: bool,
    /// Game instance
    pub session: GameSession,
    /// Key event translation
    pub keys: KeyTranslator,
    /// Input collected since the last tick
    pub pending: Vec<InputEvent>,
    /// Drawing calls of the latest frame
    pub frame: CommandList,
    /// Result of the latest tick
    pub outcome: Outcome,
    /// Event handler
    pub events: EventHandler,
}

impl App {
    /// Constructs a new instance of App
    pub fn new(session: GameSession) -> color_eyre::Result<Self> {
        let fps = session.config().fps;
        let events = EventHandler::new(fps)?;
        let mode = if events.keyboard_enhanced() {
            KeyboardMode::Enhanced
        } else {
            KeyboardMode::TapHold
        };
        let keys = KeyTranslator::new(mode, fps);
        tracing::info!("input mode: {}", keys.mode_description());

        let mut frame = CommandList::new();
        session.render(&mut frame);

        Ok(Self {
            running: true,
            session,
            keys,
            pending: Vec::new(),
            frame,
            outcome: Outcome::Continue,
            events,
        })
    }

    /// Run the application's main loop, handing the session back when it ends
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<GameSession> {
        while self.running {
            terminal.draw(|frame| frame.render_widget(&self, frame.area()))?;
            self.handle_events()?;
        }
        Ok(self.session)
    }

    pub fn handle_events(&mut self) -> color_eyre::Result<()> {
        match self.events.next()? {
            Event::Tick => self.tick(),
            Event::Crossterm(CrosstermEvent::Key(key_event)) => {
                let inputs = self.keys.translate(key_event);
                self.pending.extend(inputs);
            }
            Event::Crossterm(_) => {}
        }
        Ok(())
    }

    /// Step the game with everything typed since the last tick
    fn tick(&mut self) {
        let released = self.keys.tick();
        self.pending.extend(released);

        self.outcome = self.session.step(&self.pending);
        self.pending.clear();
        self.session.render(&mut self.frame);

        if self.outcome.is_terminal() {
            tracing::info!(outcome = ?self.outcome, "session ended");
            self.running = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, kind)
    }

    #[test]
    fn test_keycode_mapping() {
        assert_eq!(map_keycode_to_key(KeyCode::Up), Key::Up);
        assert_eq!(map_keycode_to_key(KeyCode::Char('s')), Key::Down);
        assert_eq!(map_keycode_to_key(KeyCode::Left), Key::Left);
        assert_eq!(map_keycode_to_key(KeyCode::Right), Key::Right);
        assert_eq!(map_keycode_to_key(KeyCode::Char('x')), Key::Other);
    }

    #[test]
    fn test_quit_keys() {
        let mut keys = KeyTranslator::new(KeyboardMode::Enhanced, 60);

        for event in [
            key(KeyCode::Char('q'), KeyEventKind::Press),
            key(KeyCode::Esc, KeyEventKind::Press),
            KeyEvent::new_with_kind(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL,
                KeyEventKind::Press,
            ),
        ] {
            assert_eq!(keys.translate(event), vec![InputEvent::Quit]);
        }

        // plain 'c' is just another key
        assert_eq!(
            keys.translate(key(KeyCode::Char('c'), KeyEventKind::Press)),
            vec![InputEvent::KeyDown(Key::Other)]
        );
    }

    #[test]
    fn test_enhanced_press_release() {
        let mut keys = KeyTranslator::new(KeyboardMode::Enhanced, 60);

        assert_eq!(
            keys.translate(key(KeyCode::Up, KeyEventKind::Press)),
            vec![InputEvent::KeyDown(Key::Up)]
        );
        assert!(keys
            .translate(key(KeyCode::Up, KeyEventKind::Repeat))
            .is_empty());
        assert_eq!(
            keys.translate(key(KeyCode::Up, KeyEventKind::Release)),
            vec![InputEvent::KeyUp(Key::Up)]
        );
        assert!(keys.tick().is_empty());
    }

    #[test]
    fn test_tap_hold_releases_after_timeout() {
        // 10 fps: a tap is held for 6 ticks
        let mut keys = KeyTranslator::new(KeyboardMode::TapHold, 10);

        assert_eq!(
            keys.translate(key(KeyCode::Down, KeyEventKind::Press)),
            vec![InputEvent::KeyDown(Key::Down)]
        );
        for _ in 0..5 {
            assert!(keys.tick().is_empty());
        }
        assert_eq!(keys.tick(), vec![InputEvent::KeyUp(Key::Down)]);
        assert!(keys.tick().is_empty());
    }

    #[test]
    fn test_tap_hold_repeat_extends_hold() {
        let mut keys = KeyTranslator::new(KeyboardMode::TapHold, 10);

        keys.translate(key(KeyCode::Up, KeyEventKind::Press));
        for _ in 0..4 {
            keys.tick();
        }
        // auto-repeat arrives as another press
        assert!(keys
            .translate(key(KeyCode::Up, KeyEventKind::Press))
            .is_empty());
        for _ in 0..5 {
            assert!(keys.tick().is_empty());
        }
        assert_eq!(keys.tick(), vec![InputEvent::KeyUp(Key::Up)]);
    }

    #[test]
    fn test_tap_hold_direction_switch() {
        let mut keys = KeyTranslator::new(KeyboardMode::TapHold, 60);

        keys.translate(key(KeyCode::Up, KeyEventKind::Press));
        assert_eq!(
            keys.translate(key(KeyCode::Down, KeyEventKind::Press)),
            vec![InputEvent::KeyUp(Key::Up), InputEvent::KeyDown(Key::Down)]
        );
    }

    #[test]
    fn test_tap_hold_other_keys_are_instant() {
        let mut keys = KeyTranslator::new(KeyboardMode::TapHold, 60);

        assert_eq!(
            keys.translate(key(KeyCode::Left, KeyEventKind::Press)),
            vec![InputEvent::KeyDown(Key::Left), InputEvent::KeyUp(Key::Left)]
        );
        assert!(keys.tick().is_empty());
    }
}
