use std::io::{BufWriter, Write};

use image::{codecs::gif::GifEncoder, Delay, Frame, RgbaImage};
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::{error::RenderError, palette::Palette, snapshot::FrameSnapshot};

/// Palette index of empty cells.
pub const BACKGROUND: u8 = 0;

/// A raster of palette indices, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedFrame {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u8>,
}

impl IndexedFrame {
    pub fn blank(width: usize, height: usize) -> Self {
        IndexedFrame {
            width,
            height,
            pixels: vec![BACKGROUND; width * height],
        }
    }

    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.pixels[y * self.width + x]
    }

    /// Expand palette indices into an RGBA image.
    pub fn to_rgba(&self, palette: &Palette) -> RgbaImage {
        RgbaImage::from_fn(self.width as u32, self.height as u32, |x, y| {
            palette.color(self.get(x as usize, y as usize))
        })
    }
}

/// Draws snapshots into a reused buffer. With `clear` set the whole canvas is reset before each
/// frame; otherwise only the cells drawn for the previous frame are erased. Both give the same
/// picture.
#[derive(Debug, Clone)]
pub struct Rasterizer {
    frame: IndexedFrame,
    foreground: u8,
    clear: bool,
    drawn: Vec<(usize, usize)>,
}

impl Rasterizer {
    pub fn new(width: usize, height: usize, foreground: u8, clear: bool) -> Self {
        Rasterizer {
            frame: IndexedFrame::blank(width, height),
            foreground,
            clear,
            drawn: Vec::new(),
        }
    }

    pub fn draw(&mut self, snapshot: &FrameSnapshot) -> &IndexedFrame {
        let width = self.frame.width;
        if self.clear {
            self.frame.pixels.iter_mut().for_each(|p| *p = BACKGROUND);
        } else {
            for &(x, y) in &self.drawn {
                self.frame.pixels[y * width + x] = BACKGROUND;
            }
        }

        self.drawn.clear();
        for &(x, y) in &snapshot.positions {
            if x < width && y < self.frame.height {
                self.frame.pixels[y * width + x] = self.foreground;
                self.drawn.push((x, y));
            }
        }
        &self.frame
    }
}

/// Draw one snapshot onto a fresh background.
pub fn rasterize(snapshot: &FrameSnapshot, foreground: u8) -> IndexedFrame {
    let mut rasterizer = Rasterizer::new(snapshot.width, snapshot.height, foreground, false);
    rasterizer.draw(snapshot).clone()
}

/// Draw every snapshot, in parallel, keeping the input order.
pub fn rasterize_all(snapshots: &[FrameSnapshot], foreground: u8, clear: bool) -> Vec<IndexedFrame> {
    let (width, height) = match snapshots.first() {
        Some(first) => (first.width, first.height),
        None => return Vec::new(),
    };

    let pb = ProgressBar::new(snapshots.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} frames")
            .progress_chars("#>-"),
    );

    let frames: Vec<IndexedFrame> = snapshots
        .par_iter()
        .progress_with(pb.clone())
        .map_init(
            || Rasterizer::new(width, height, foreground, clear),
            |rasterizer, snapshot| rasterizer.draw(snapshot).clone(),
        )
        .collect();

    pb.finish_and_clear();
    debug!(frames = frames.len(), "rasterized snapshots");
    frames
}

/// Write the frames as one animated GIF. `delay` is in hundredths of a second per frame.
///
/// The output is flushed before returning, so a failed final write, including the GIF trailer,
/// is reported as an error.
pub fn encode_gif<W: Write>(
    writer: W,
    frames: &[IndexedFrame],
    palette: &Palette,
    delay: u16,
) -> Result<(), RenderError> {
    let first = frames.first().ok_or(RenderError::NoFrames)?;
    let (width, height) = (first.width, first.height);
    let frame_delay = Delay::from_numer_denom_ms(u32::from(delay) * 10, 1);

    let mut out = BufWriter::new(writer);
    {
        // The encoder writes the trailer on drop, into `out`.
        let mut encoder = GifEncoder::new(&mut out);
        for frame in frames {
            if frame.width != width || frame.height != height {
                return Err(RenderError::FrameSizeMismatch {
                    width: width as u32,
                    height: height as u32,
                    got_width: frame.width as u32,
                    got_height: frame.height as u32,
                });
            }
            encoder.encode_frame(Frame::from_parts(frame.to_rgba(palette), 0, 0, frame_delay))?;
        }
    }
    out.flush()?;

    info!(frames = frames.len(), width, height, delay, "encoded animation");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(tick: usize, positions: Vec<(usize, usize)>) -> FrameSnapshot {
        FrameSnapshot {
            width: 4,
            height: 3,
            tick,
            positions,
        }
    }

    #[test]
    fn test_rasterize_marks_agent_cells() {
        let frame = rasterize(&snapshot(0, vec![(1, 2), (3, 0)]), 254);
        assert_eq!(frame.get(1, 2), 254);
        assert_eq!(frame.get(3, 0), 254);
        assert_eq!(frame.pixels.iter().filter(|&&p| p == 254).count(), 2);
        assert_eq!(frame.pixels.iter().filter(|&&p| p == BACKGROUND).count(), 10);
    }

    #[test]
    fn test_rasterizer_modes_agree() {
        let frames = vec![
            snapshot(0, vec![(0, 0), (1, 1)]),
            snapshot(1, vec![(2, 2)]),
            snapshot(2, vec![(3, 1), (0, 0)]),
        ];
        let mut clearing = Rasterizer::new(4, 3, 254, true);
        let mut erasing = Rasterizer::new(4, 3, 254, false);
        for snap in &frames {
            let expected = rasterize(snap, 254);
            assert_eq!(clearing.draw(snap), &expected);
            assert_eq!(erasing.draw(snap), &expected);
        }
    }

    #[test]
    fn test_rasterize_all_keeps_order() {
        let snapshots: Vec<_> = (0..4).map(|x| snapshot(x, vec![(x, 1)])).collect();
        let frames = rasterize_all(&snapshots, 7, false);
        assert_eq!(frames.len(), 4);
        for (x, frame) in frames.iter().enumerate() {
            assert_eq!(frame.get(x, 1), 7);
        }
        assert!(rasterize_all(&[], 7, false).is_empty());
    }

    #[test]
    fn test_to_rgba_uses_palette() {
        let palette = Palette::grayscale(255);
        let frame = rasterize(&snapshot(0, vec![(2, 1)]), 254);
        let image = frame.to_rgba(&palette);
        assert_eq!(image.dimensions(), (4, 3));
        assert_eq!(image.get_pixel(2, 1).0, [255, 255, 255, 255]);
        assert_eq!(image.get_pixel(0, 0).0, [0, 0, 0, 255]);
    }

    #[test]
    fn test_encode_gif_writes_header() {
        let palette = Palette::grayscale(255);
        let frames = vec![
            rasterize(&snapshot(0, vec![(0, 0)]), 254),
            rasterize(&snapshot(1, vec![(1, 1)]), 254),
        ];
        let mut out = Vec::new();
        encode_gif(&mut out, &frames, &palette, 8).unwrap();
        assert_eq!(&out[..6], b"GIF89a");
    }

    struct BrokenDisk;

    impl Write for BrokenDisk {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "no space left"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "no space left"))
        }
    }

    #[test]
    fn test_encode_gif_reports_failed_final_write() {
        let palette = Palette::grayscale(255);
        let frames = vec![IndexedFrame::blank(4, 4)];

        let result = encode_gif(BufWriter::new(BrokenDisk), &frames, &palette, 8);
        assert!(matches!(result, Err(RenderError::Io(_))));

        let result = encode_gif(BrokenDisk, &frames, &palette, 8);
        assert!(matches!(result, Err(RenderError::Io(_))));
    }

    #[test]
    fn test_encode_gif_ends_with_trailer() {
        let palette = Palette::grayscale(255);
        let frames = vec![IndexedFrame::blank(4, 4)];
        let mut out = Vec::new();
        encode_gif(&mut out, &frames, &palette, 8).unwrap();
        assert_eq!(out.last(), Some(&0x3B));
    }

    #[test]
    fn test_encode_gif_rejects_empty_and_mismatched() {
        let palette = Palette::grayscale(255);
        let mut out = Vec::new();
        assert!(matches!(
            encode_gif(&mut out, &[], &palette, 0),
            Err(RenderError::NoFrames)
        ));

        let frames = vec![IndexedFrame::blank(4, 3), IndexedFrame::blank(3, 3)];
        assert!(matches!(
            encode_gif(&mut out, &frames, &palette, 0),
            Err(RenderError::FrameSizeMismatch { got_width: 3, .. })
        ));
    }
}
