//! Core types shared by the Pong game engine.

/// Which side of the table
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Side {
    /// Human player, defending the right edge
    Player,
    /// Computer opponent, defending the left edge
    Cpu,
}

impl Side {
    /// Get the opposite side
    pub fn opposite(self) -> Side {
        match self {
            Side::Player => Side::Cpu,
            Side::Cpu => Side::Player,
        }
    }
}

/// Result of a single tick
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Keep running
    Continue,
    /// A quit event was received
    Quit,
    /// Someone reached the max score (winner)
    GameOver(Side),
}

impl Outcome {
    /// Whether the driver should stop its loop
    pub fn is_terminal(self) -> bool {
        !matches!(self, Outcome::Continue)
    }
}

/// Keys the game distinguishes
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Other,
}

/// Discrete input event fed into a tick
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    KeyDown(Key),
    KeyUp(Key),
}

/// RGB color triple
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgb(pub u8, pub u8, pub u8);

/// 2D point in world coordinates (y grows downwards)
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Point { x, y }
    }
}

/// Axis-aligned rectangle, anchored at its top-left corner
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    /// Edges and center of this rectangle
    pub fn borders(&self) -> Borders {
        Borders {
            left: self.x,
            right: self.x + self.width,
            top: self.y,
            bottom: self.y + self.height,
            center_x: self.x + self.width / 2.0,
            center_y: self.y + self.height / 2.0,
        }
    }
}

/// Edges and center of a game object
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Borders {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
    pub center_x: f32,
    pub center_y: f32,
}

impl Borders {
    /// Whether `y` lies within the vertical span (inclusive)
    pub fn spans_y(&self, y: f32) -> bool {
        y >= self.top && y <= self.bottom
    }
}

/// Score and difficulty bookkeeping for one session
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Stats {
    pub player_score: u32,
    pub cpu_score: u32,
    /// Difficulty level, starts at 1 and only goes up
    pub level: u32,
    /// Score differential (player - cpu) at the last level change
    pub last_diff: i32,
    pub winner: Option<Side>,
    /// Magnitude of each ball speed component on the next serve
    pub serve_speed: (f32, f32),
    /// Current computer paddle speed
    pub cpu_speed: f32,
}

impl Stats {
    pub fn new(serve_speed: (f32, f32), cpu_speed: f32) -> Self {
        Stats {
            player_score: 0,
            cpu_score: 0,
            level: 1,
            last_diff: 0,
            winner: None,
            serve_speed,
            cpu_speed,
        }
    }

    /// Score of one side
    pub fn score(&self, side: Side) -> u32 {
        match side {
            Side::Player => self.player_score,
            Side::Cpu => self.cpu_score,
        }
    }

    /// Player score minus cpu score
    pub fn diff(&self) -> i32 {
        self.player_score as i32 - self.cpu_score as i32
    }
}
