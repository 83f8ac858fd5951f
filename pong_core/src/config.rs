//! Game configuration, color palette and validation.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::types::Rgb;

/// Default field size (world units)
pub const FIELD_WIDTH: f32 = 320.0;
pub const FIELD_HEIGHT: f32 = 240.0;
/// Thickness of the top and bottom walls
pub const BORDER_WIDTH: f32 = 2.0;

pub const PADDLE_WIDTH: f32 = 10.0;
pub const PADDLE_HEIGHT: f32 = 40.0;
/// Distance between a paddle's outer edge and the field edge
pub const PADDLE_INSET: f32 = 20.0;

pub const BALL_RADIUS: f32 = 5.0;

/// Color palette entries available by name
const RGB_COLORS: [(&str, Rgb); 10] = [
    ("black", Rgb(0, 0, 0)),
    ("white", Rgb(255, 255, 255)),
    ("red", Rgb(255, 0, 0)),
    ("green", Rgb(0, 255, 0)),
    ("blue", Rgb(0, 0, 255)),
    ("yellow", Rgb(255, 255, 0)),
    ("cyan", Rgb(0, 255, 255)),
    ("magenta", Rgb(255, 0, 255)),
    ("gray", Rgb(128, 128, 128)),
    ("orange", Rgb(255, 165, 0)),
];

/// The built-in named color palette
pub fn rgb_colors() -> BTreeMap<String, Rgb> {
    RGB_COLORS
        .iter()
        .map(|(name, rgb)| (name.to_string(), *rgb))
        .collect()
}

/// Configuration errors, reported before a session starts
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{what} must be positive, got {value}")]
    NonPositive { what: &'static str, value: f32 },
    #[error("{what} must not be negative, got {value}")]
    Negative { what: &'static str, value: f32 },
    #[error("fps must be at least 1")]
    ZeroFps,
    #[error("max score must be at least 1")]
    ZeroMaxScore,
    #[error("{what} color name is empty")]
    EmptyColorName { what: &'static str },
    #[error("unknown color `{0}`")]
    UnknownColor(String),
    #[error("{0} paddle does not fit inside the field")]
    PaddleOutOfField(String),
    #[error("ball does not fit inside the field")]
    BallOutOfField,
    #[cfg(feature = "serde")]
    #[error("invalid config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Playing field settings
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct FieldConfig {
    pub width: f32,
    pub height: f32,
    pub background_color: String,
    pub line_color: String,
    pub title: String,
    pub border_width: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
            background_color: "black".to_string(),
            line_color: "white".to_string(),
            title: "Pong".to_string(),
            border_width: BORDER_WIDTH,
        }
    }
}

/// Per-paddle settings
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct PaddleConfig {
    pub name: String,
    pub color: String,
    pub width: f32,
    pub height: f32,
}

impl PaddleConfig {
    fn named(name: &str, color: &str) -> Self {
        PaddleConfig {
            name: name.to_string(),
            color: color.to_string(),
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
        }
    }
}

impl Default for PaddleConfig {
    fn default() -> Self {
        PaddleConfig::named("Player", "white")
    }
}

/// Ball settings
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct BallConfig {
    pub radius: f32,
    pub color: String,
}

impl Default for BallConfig {
    fn default() -> Self {
        BallConfig {
            radius: BALL_RADIUS,
            color: "red".to_string(),
        }
    }
}

/// Game configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Config {
    pub field: FieldConfig,
    /// Human paddle (right side)
    pub player: PaddleConfig,
    /// Computer paddle (left side)
    pub cpu: PaddleConfig,
    pub ball: BallConfig,
    /// Distance from the field edge to each paddle's outer edge
    pub paddle_inset: f32,
    /// Ticks per second
    pub fps: u16,
    /// Score that ends the game
    pub max_score: u32,
    /// Player paddle speed while a key is held (units per tick)
    pub player_speed: f32,
    /// Initial computer paddle speed (units per tick)
    pub cpu_speed: f32,
    /// Added to the cpu speed and both ball speed components on every goal
    pub cpu_speed_increment: f32,
    /// Magnitude of each ball speed component on the first serve
    pub default_ball_speed: f32,
    /// The computer ignores vertical offsets smaller than this
    pub ai_dead_zone: f32,
    /// Speed the computer sheds per tick when not chasing
    pub ai_deceleration: f32,
    /// Zero both paddle speeds when the ball is served
    pub stop_paddles_on_serve: bool,
    /// Seed for serve directions
    pub seed: u64,
    /// Named color palette
    pub rgb_colors: BTreeMap<String, Rgb>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            field: FieldConfig::default(),
            player: PaddleConfig::named("Player", "white"),
            cpu: PaddleConfig::named("CPU", "white"),
            ball: BallConfig::default(),
            paddle_inset: PADDLE_INSET,
            fps: 60,
            max_score: 10,
            player_speed: 4.0,
            cpu_speed: 2.0,
            cpu_speed_increment: 0.25,
            default_ball_speed: 2.0,
            ai_dead_zone: 5.0,
            ai_deceleration: 0.5,
            stop_paddles_on_serve: false,
            seed: 0xC0FFEE,
            rgb_colors: rgb_colors(),
        }
    }
}

impl Config {
    /// Parse a JSON config; missing fields take their defaults
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Look up a palette color by name
    pub fn color(&self, name: &str) -> Result<Rgb, ConfigError> {
        self.rgb_colors
            .get(name)
            .copied()
            .ok_or_else(|| ConfigError::UnknownColor(name.to_string()))
    }

    /// Check the configuration describes a playable field
    pub fn validate(&self) -> Result<(), ConfigError> {
        let field = &self.field;
        positive("field width", field.width)?;
        positive("field height", field.height)?;
        not_negative("border width", field.border_width)?;
        positive("ball radius", self.ball.radius)?;
        not_negative("paddle inset", self.paddle_inset)?;

        for (what, speed) in [
            ("player speed", self.player_speed),
            ("cpu speed", self.cpu_speed),
            ("cpu speed increment", self.cpu_speed_increment),
            ("default ball speed", self.default_ball_speed),
            ("ai dead zone", self.ai_dead_zone),
            ("ai deceleration", self.ai_deceleration),
        ] {
            not_negative(what, speed)?;
        }

        if self.fps == 0 {
            return Err(ConfigError::ZeroFps);
        }
        if self.max_score == 0 {
            return Err(ConfigError::ZeroMaxScore);
        }

        for (what, name) in [
            ("background", &field.background_color),
            ("line", &field.line_color),
            ("ball", &self.ball.color),
            ("player", &self.player.color),
            ("cpu", &self.cpu.color),
        ] {
            if name.trim().is_empty() {
                return Err(ConfigError::EmptyColorName { what });
            }
            self.color(name)?;
        }

        let inner_height = field.height - 2.0 * field.border_width;
        for paddle in [&self.player, &self.cpu] {
            positive("paddle width", paddle.width)?;
            positive("paddle height", paddle.height)?;
            if paddle.height > inner_height {
                return Err(ConfigError::PaddleOutOfField(paddle.name.clone()));
            }
        }
        // Both paddles plus their insets must leave room between them
        let occupied = 2.0 * self.paddle_inset + self.player.width + self.cpu.width;
        if occupied >= field.width {
            return Err(ConfigError::PaddleOutOfField(self.player.name.clone()));
        }

        if 2.0 * self.ball.radius >= inner_height {
            return Err(ConfigError::BallOutOfField);
        }

        Ok(())
    }
}

fn positive(what: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { what, value })
    }
}

fn not_negative(what: &'static str, value: f32) -> Result<(), ConfigError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { what, value })
    }
}
