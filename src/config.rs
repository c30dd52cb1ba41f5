use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Immutable run parameters. Consumed once when the model is constructed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Grid width in cells.
    pub width: usize,
    /// Grid height in cells.
    pub height: usize,
    /// Number of agents, created once at the start of the run.
    pub agent_count: usize,
    /// Angle between the front sensor and each side sensor, in degrees. Also the turn angle.
    pub sensor_angle: f64,
    /// How far ahead of the agent the sensors sit.
    pub sensor_distance: f64,
    /// Distance covered by one move.
    pub step_distance: f64,
    /// Number of ticks to simulate, one frame per tick.
    pub ticks: usize,
    /// Multiplier applied to every cell once per tick.
    pub decay_factor: f64,
    /// Trail added to the agent's cell after every move.
    pub deposit_amount: f64,
    /// Per-frame delay of the output animation, in hundredths of a second.
    pub frame_delay: u16,
    /// Number of gray levels in the output palette.
    pub palette_size: usize,
    /// Palette index used to draw agents. Index 0 is the background.
    pub foreground_index: u8,
    /// Clear the whole canvas before drawing each frame.
    pub clear_canvas: bool,
    /// Log the full state of every agent on every tick.
    pub trace_agents: bool,
    /// Seed for the random source. Entropy is used when absent.
    pub seed: Option<u64>,
}

impl Config {
    /// Smallest grid that still has an interior cell.
    pub const MIN_DIMENSION: usize = 3;
    pub const DEFAULT_DECAY_FACTOR: f64 = 0.9;
    pub const DEFAULT_DEPOSIT_AMOUNT: f64 = 5.0;

    /// 640x640 canvas, 100 agents with a 45 degree sensor spread.
    pub fn large() -> Self {
        Config {
            width: 640,
            height: 640,
            agent_count: 100,
            sensor_angle: 45.0,
            sensor_distance: 9.0,
            step_distance: 1.0,
            ticks: 100,
            decay_factor: Self::DEFAULT_DECAY_FACTOR,
            deposit_amount: Self::DEFAULT_DEPOSIT_AMOUNT,
            frame_delay: 8,
            palette_size: 255,
            foreground_index: 254,
            clear_canvas: false,
            trace_agents: false,
            seed: None,
        }
    }

    /// 240x240 canvas with a single traced agent and a 25 degree sensor spread.
    pub fn small() -> Self {
        Config {
            width: 240,
            height: 240,
            agent_count: 1,
            sensor_angle: 25.0,
            frame_delay: 0,
            clear_canvas: true,
            trace_agents: true,
            ..Self::large()
        }
    }

    /// Read a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| ConfigError::Load(format!("{}: {}", path.display(), e)))?;
        serde_json::from_str(&text)
            .map_err(|e| ConfigError::Load(format!("{}: {}", path.display(), e)))
    }

    /// Longest step for which every interior point has an in-bounds move: half the open interior
    /// along the shorter axis.
    pub fn max_step_distance(&self) -> f64 {
        self.width.min(self.height).saturating_sub(1) as f64 / 2.0
    }

    pub fn validate(&self) -> Result<()> {
        self.validate_grid()?;
        self.validate_run()?;
        self.validate_agents()?;
        self.validate_output()?;
        Ok(())
    }

    fn validate_grid(&self) -> Result<()> {
        if self.width < Self::MIN_DIMENSION || self.height < Self::MIN_DIMENSION {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
                min: Self::MIN_DIMENSION,
            });
        }
        if !(self.decay_factor >= 0.0 && self.decay_factor < 1.0) {
            return Err(ConfigError::InvalidDecayFactor(self.decay_factor));
        }
        Ok(())
    }

    fn validate_run(&self) -> Result<()> {
        if self.agent_count == 0 {
            return Err(ConfigError::NoAgents);
        }
        if self.ticks == 0 {
            return Err(ConfigError::NoTicks);
        }
        Ok(())
    }

    fn validate_agents(&self) -> Result<()> {
        if !(self.deposit_amount >= 0.0 && self.deposit_amount <= f32::MAX as f64) {
            return Err(ConfigError::InvalidDepositAmount(self.deposit_amount));
        }
        if !self.sensor_angle.is_finite() {
            return Err(ConfigError::InvalidSensorAngle(self.sensor_angle));
        }
        if !(self.sensor_distance.is_finite() && self.sensor_distance >= 0.0) {
            return Err(ConfigError::InvalidSensorDistance(self.sensor_distance));
        }
        if !(self.step_distance.is_finite() && self.step_distance > 0.0) {
            return Err(ConfigError::InvalidStepDistance(self.step_distance));
        }
        let max = self.max_step_distance();
        if self.step_distance >= max {
            return Err(ConfigError::StepTooLong {
                step: self.step_distance,
                width: self.width,
                height: self.height,
                max,
            });
        }
        Ok(())
    }

    fn validate_output(&self) -> Result<()> {
        if self.palette_size < 2 || self.palette_size > 256 {
            return Err(ConfigError::InvalidPaletteSize(self.palette_size));
        }
        if self.foreground_index as usize >= self.palette_size {
            return Err(ConfigError::ForegroundOutOfPalette {
                index: self.foreground_index,
                size: self.palette_size,
            });
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::large()
    }
}
