use rand::Rng;
use rand_distr::{Distribution, Uniform};
use tracing::trace;

use crate::{
    grid::Grid,
    math::{is_interior, normalize_degrees, project},
};

/// Upper bound on heading perturbations while looking for an in-bounds step. With a full 360
/// degree perturbation range this is never reached in practice.
const MAX_MOVE_ATTEMPTS: usize = 10_000;

/// Half-width of the random heading perturbation applied after a blocked step, in degrees.
const PERTURBATION_RANGE: f64 = 180.0;

/// Front-left, front and front-right trail readings taken at the start of a tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Sensors {
    pub front_left: f32,
    pub front: f32,
    pub front_right: f32,
}

/// A single Physarum agent. The x and y positions are continuous, hence we use floating point
/// numbers instead of integers. Headings are in degrees and kept in [0, 360).
#[derive(Debug, Clone)]
pub struct Agent {
    pub x: f64,
    pub y: f64,
    pub direction: f64,
    pub sensor_angle: f64,
    pub sensor_distance: f64,
    pub sensors: Sensors,
}

impl Agent {
    pub fn new(x: f64, y: f64, direction: f64, sensor_angle: f64, sensor_distance: f64) -> Self {
        Agent {
            x,
            y,
            direction: normalize_degrees(direction),
            sensor_angle,
            sensor_distance,
            sensors: Sensors::default(),
        }
    }

    /// Construct a new agent at a random position strictly inside the grid, facing a random
    /// direction.
    pub fn random<R: Rng>(
        grid: &Grid,
        sensor_angle: f64,
        sensor_distance: f64,
        rng: &mut R,
    ) -> Self {
        let (width, height) = (grid.width(), grid.height());
        let (x, y) = loop {
            let x = rng.gen::<f64>() * (width - 1) as f64;
            let y = rng.gen::<f64>() * (height - 1) as f64;
            if is_interior(x, y, width, height) {
                break (x, y);
            }
        };
        let direction = rng.gen::<f64>() * 360.0;
        Agent::new(x, y, direction, sensor_angle, sensor_distance)
    }

    /// Read the trail at the three sensor positions.
    pub fn sense(&mut self, grid: &Grid) {
        let left = normalize_degrees(self.direction - self.sensor_angle);
        let right = normalize_degrees(self.direction + self.sensor_angle);
        self.sensors = Sensors {
            front_left: self.reading(grid, left),
            front: self.reading(grid, self.direction),
            front_right: self.reading(grid, right),
        };
    }

    fn reading(&self, grid: &Grid, angle: f64) -> f32 {
        let (x, y) = project(self.x, self.y, angle, self.sensor_distance);
        grid.sample_at(x, y)
    }

    /// Turn towards the strongest trail according to the last sensor readings.
    pub fn steer<R: Rng>(&mut self, rng: &mut R) {
        let Sensors {
            front_left: fl,
            front: f,
            front_right: fr,
        } = self.sensors;

        if f > fl && f > fr {
            trace!("front is strongest, keeping heading");
        } else if f < fl && f < fr {
            if rng.gen_bool(0.5) {
                trace!("front is weakest, turning left at random");
                self.turn(-self.sensor_angle);
            } else {
                trace!("front is weakest, turning right at random");
                self.turn(self.sensor_angle);
            }
        } else if fl < fr {
            trace!("turning right");
            self.turn(self.sensor_angle);
        } else if fr < fl {
            trace!("turning left");
            self.turn(-self.sensor_angle);
        }
    }

    fn turn(&mut self, angle: f64) {
        self.direction = normalize_degrees(self.direction + angle);
    }

    /// Step `distance` along the current heading. A step that would land on or beyond the border
    /// is rejected: the heading is perturbed at random and the step retried from the same
    /// position until one stays inside.
    ///
    /// # Panics
    ///
    /// Panics if no in-bounds step is found after `MAX_MOVE_ATTEMPTS` perturbations, which means
    /// the agent is not inside the grid to begin with.
    pub fn step<R: Rng>(&mut self, grid: &Grid, distance: f64, rng: &mut R) {
        let perturbation = Uniform::new_inclusive(-PERTURBATION_RANGE, PERTURBATION_RANGE);
        let (width, height) = (grid.width(), grid.height());

        for _ in 0..MAX_MOVE_ATTEMPTS {
            let (x, y) = project(self.x, self.y, self.direction, distance);
            if is_interior(x, y, width, height) {
                self.x = x;
                self.y = y;
                return;
            }
            self.direction = normalize_degrees(self.direction + perturbation.sample(rng));
        }

        panic!(
            "agent at ({}, {}) found no in-bounds step within {} attempts on a {}x{} grid",
            self.x, self.y, MAX_MOVE_ATTEMPTS, width, height
        );
    }

    /// Drop trail at the agent's current cell.
    pub fn deposit(&self, grid: &mut Grid, amount: f32) {
        grid.deposit_at(self.x, self.y, amount);
    }
}
