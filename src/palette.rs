use image::Rgba;

/// Color lookup table for indexed frames.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Rgba<u8>>,
}

impl Palette {
    /// Gray ramp of `n` colors: index 0 is black, the last index is white and the indices in
    /// between step by `255 / (n - 1)`.
    pub fn grayscale(n: usize) -> Self {
        assert!((2..=256).contains(&n), "palette size must be in 2..=256");
        let steps = n - 1;
        let delta = 255 / steps;

        let mut colors = Vec::with_capacity(n);
        colors.push(gray(0));
        colors.extend((1..steps).map(|i| gray((delta * i) as u8)));
        colors.push(gray(255));

        Palette { colors }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color at `index`. Indices past the end map to the last color.
    pub fn color(&self, index: u8) -> Rgba<u8> {
        let i = (index as usize).min(self.colors.len() - 1);
        self.colors[i]
    }
}

fn gray(level: u8) -> Rgba<u8> {
    Rgba([level, level, level, 255])
}
