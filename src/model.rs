use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, info, trace};

use crate::{
    agent::Agent,
    config::Config,
    error::{ConfigError, Result},
    grid::Grid,
    math::is_interior,
    snapshot::FrameSnapshot,
};

/// Top-level simulation class. Owns the agents, the grid they move on and the random source.
#[derive(Debug)]
pub struct Model<R: Rng = StdRng> {
    // Physarum agents, processed in creation order.
    agents: Vec<Agent>,

    // The grid they move on.
    grid: Grid,

    config: Config,
    rng: R,

    iteration: usize,
}

impl Model<StdRng> {
    /// Construct a new model with random initial conditions. The random source is seeded from
    /// `config.seed` when set.
    pub fn new(config: Config) -> Result<Self> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> Model<R> {
    /// Construct a new model drawing all randomness from `rng`.
    pub fn with_rng(config: Config, mut rng: R) -> Result<Self> {
        config.validate()?;
        let grid = Grid::new(config.width, config.height);
        let agents = (0..config.agent_count)
            .map(|_| Agent::random(&grid, config.sensor_angle, config.sensor_distance, &mut rng))
            .collect();
        Ok(Model {
            agents,
            grid,
            config,
            rng,
            iteration: 0,
        })
    }

    /// Construct a model around explicitly placed agents. Every agent must lie strictly inside
    /// the grid.
    pub fn with_agents(config: Config, agents: Vec<Agent>, rng: R) -> Result<Self> {
        let config = Config {
            agent_count: agents.len(),
            ..config
        };
        config.validate()?;
        if let Some((index, agent)) = agents
            .iter()
            .enumerate()
            .find(|(_, a)| !is_interior(a.x, a.y, config.width, config.height))
        {
            return Err(ConfigError::AgentOutsideGrid {
                index,
                x: agent.x,
                y: agent.y,
            });
        }
        Ok(Model {
            agents,
            grid: Grid::new(config.width, config.height),
            config,
            rng,
            iteration: 0,
        })
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Number of ticks completed so far.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    pub fn print_configurations(&self) {
        let c = &self.config;
        info!(
            width = c.width,
            height = c.height,
            agents = c.agent_count,
            ticks = c.ticks,
            "grid"
        );
        info!(
            sensor_angle = c.sensor_angle,
            sensor_distance = c.sensor_distance,
            step_distance = c.step_distance,
            "agents"
        );
        info!(
            decay_factor = c.decay_factor,
            deposit_amount = c.deposit_amount,
            "trail"
        );
    }

    /// Perform a single simulation step. Each agent in turn senses, steers, moves and deposits,
    /// so later agents already see the trail of earlier ones. The grid then decays and diffuses
    /// once.
    pub fn step(&mut self) -> FrameSnapshot {
        let step_distance = self.config.step_distance;
        let deposit_amount = self.config.deposit_amount as f32;

        for (id, agent) in self.agents.iter_mut().enumerate() {
            agent.sense(&self.grid);
            agent.steer(&mut self.rng);
            agent.step(&self.grid, step_distance, &mut self.rng);
            agent.deposit(&mut self.grid, deposit_amount);

            if self.config.trace_agents {
                debug!(tick = self.iteration, id, ?agent, "agent");
            } else {
                trace!(tick = self.iteration, id, x = agent.x, y = agent.y, "agent");
            }
        }

        self.grid.decay(self.config.decay_factor as f32);
        self.grid.diffuse();

        let snapshot = FrameSnapshot::new(
            self.grid.width(),
            self.grid.height(),
            self.iteration,
            &self.agents,
        );
        self.iteration += 1;
        snapshot
    }

    /// Run the configured number of ticks, handing each snapshot to `sink` as it is produced.
    pub fn run_with<F: FnMut(FrameSnapshot)>(&mut self, mut sink: F) {
        info!(ticks = self.config.ticks, agents = self.agents.len(), "starting run");
        for _ in 0..self.config.ticks {
            let snapshot = self.step();
            debug!(tick = snapshot.tick, "tick done");
            sink(snapshot);
        }
        info!(iterations = self.iteration, "run finished");
    }

    /// Run the configured number of ticks and collect every snapshot.
    pub fn run(&mut self) -> Vec<FrameSnapshot> {
        let mut snapshots = Vec::with_capacity(self.config.ticks);
        self.run_with(|snapshot| snapshots.push(snapshot));
        snapshots
    }
}
