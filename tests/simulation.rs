use std::fs;

use physalum::{model::Model, palette::Palette, render, Config};

fn seeded(ticks: usize) -> Config {
    Config {
        width: 96,
        height: 96,
        agent_count: 40,
        ticks,
        seed: Some(2024),
        ..Config::large()
    }
}

#[test]
fn run_produces_one_frame_per_tick() {
    let mut model = Model::new(seeded(30)).expect("valid config");
    let snapshots = model.run();

    assert_eq!(snapshots.len(), 30);
    for snapshot in &snapshots {
        assert_eq!(snapshot.positions.len(), 40);
        for &(x, y) in &snapshot.positions {
            assert!(x < 95 && y < 95, "agent cell ({}, {}) on the border", x, y);
        }
    }
}

#[test]
fn trail_builds_up_and_stays_finite() {
    let mut model = Model::new(seeded(60)).expect("valid config");
    model.run();
    let cells = model.grid().cells();
    assert!(cells.iter().all(|v| v.is_finite() && *v >= 0.0));
    assert!(cells.iter().any(|&v| v > 0.0));
}

#[test]
fn small_preset_runs_end_to_end() {
    let config = Config {
        ticks: 10,
        seed: Some(1),
        ..Config::small()
    };
    let mut model = Model::new(config).expect("valid config");
    let snapshots = model.run();
    let frames = render::rasterize_all(&snapshots, 254, true);
    assert_eq!(frames.len(), 10);
    for frame in &frames {
        assert_eq!(frame.pixels.iter().filter(|&&p| p == 254).count(), 1);
    }
}

#[test]
fn writes_animated_gif() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("run.gif");

    let config = seeded(12);
    let mut model = Model::new(config.clone()).expect("valid config");
    let snapshots = model.run();
    let frames = render::rasterize_all(&snapshots, config.foreground_index, config.clear_canvas);
    let palette = Palette::grayscale(config.palette_size);

    let file = fs::File::create(&path).expect("create output");
    render::encode_gif(file, &frames, &palette, config.frame_delay).expect("encode gif");

    let bytes = fs::read(&path).expect("read output");
    assert_eq!(&bytes[..6], b"GIF89a");
    assert_eq!(u16::from_le_bytes([bytes[6], bytes[7]]), 96);
    assert_eq!(u16::from_le_bytes([bytes[8], bytes[9]]), 96);
    assert_eq!(*bytes.last().expect("non-empty"), 0x3B);
}
