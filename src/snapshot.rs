use crate::agent::Agent;

/// Agent positions at the end of one tick, ready to be drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameSnapshot {
    pub width: usize,
    pub height: usize,
    pub tick: usize,
    /// Floored (x, y) cell of every agent, in agent order.
    pub positions: Vec<(usize, usize)>,
}

impl FrameSnapshot {
    pub fn new(width: usize, height: usize, tick: usize, agents: &[Agent]) -> Self {
        FrameSnapshot {
            width,
            height,
            tick,
            positions: agents
                .iter()
                .map(|agent| (agent.x.floor() as usize, agent.y.floor() as usize))
                .collect(),
        }
    }
}
