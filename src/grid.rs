use std::mem;

use crate::{blur::box_blur_3x3, math::is_interior};

/// The pheromone field: a 2D grid with a scalar value per each grid block, stored row-major.
#[derive(Debug, Clone)]
pub struct Grid {
    width: usize,
    height: usize,
    data: Vec<f32>,

    // Scratch space for the diffusion pass.
    buf: Vec<f32>,
}

impl Grid {
    /// Create a new zero-filled grid. Callers validate the dimensions beforehand, see
    /// [`Config::validate`](crate::config::Config::validate).
    pub fn new(width: usize, height: usize) -> Self {
        assert!(
            width >= 3 && height >= 3,
            "Grid dimensions must be at least 3x3."
        );
        Grid {
            width,
            height,
            data: vec![0.0; width * height],
            buf: vec![0.0; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw cell values, row-major.
    pub fn cells(&self) -> &[f32] {
        &self.data
    }

    /// Truncate x and y and return a corresponding index into the data slice.
    fn index(&self, x: f64, y: f64) -> usize {
        let i = x.floor() as usize;
        let j = y.floor() as usize;
        j * self.width + i
    }

    /// Value stored at integer cell (x, y).
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.width + x]
    }

    /// Read the cell containing (x, y). Positions on or outside the border read as zero, so a
    /// sensor reaching past the edge of the grid sees nothing.
    pub fn sample_at(&self, x: f64, y: f64) -> f32 {
        if is_interior(x, y, self.width, self.height) {
            self.data[self.index(x, y)]
        } else {
            0.0
        }
    }

    /// Add a value to the cell containing (x, y). The position must lie inside the grid.
    pub fn deposit_at(&mut self, x: f64, y: f64, amount: f32) {
        let idx = self.index(x, y);
        self.data[idx] += amount;
    }

    /// Scale every cell by `factor`.
    pub fn decay(&mut self, factor: f32) {
        self.data.iter_mut().for_each(|v| *v *= factor);
    }

    /// Replace every interior cell with the mean of its 3x3 neighbourhood and zero the border.
    /// Reads come from the previous state only.
    pub fn diffuse(&mut self) {
        box_blur_3x3(&self.data, &mut self.buf, self.width, self.height);
        mem::swap(&mut self.data, &mut self.buf);
    }
}
