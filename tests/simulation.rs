use rand::rngs::StdRng;
use rand::SeedableRng;
use spinbrush::color::Palette;
use spinbrush::graphics::PixelBuffer;
use spinbrush::math::{Bounds, Point};
use spinbrush::pulse::Direction;
use spinbrush::render::{self, DrawCommand};
use spinbrush::sim::{self, TickOutcome};
use spinbrush::state::{SimConfig, SimState, ToggleFlags};

const START: Palette = Palette::new(90, 160, 220);

fn fresh(bounds: Bounds, playing: bool) -> SimState {
    SimState::new(bounds, SimConfig::default(), START, playing)
}

#[test]
fn ten_quiet_ticks_stamp_ten_times_along_a_unit_walk() {
    let mut rng = StdRng::seed_from_u64(0x5EED);
    let mut state = fresh(Bounds::new(300.0, 200.0), true);
    let mut canvas = PixelBuffer::new(300, 200, Palette::BLACK);
    let flags = ToggleFlags::default();

    let mut centers: Vec<Point> = Vec::new();
    for _ in 0..10 {
        let outcome = sim::tick(&mut state, &flags, &mut rng);
        match outcome.command() {
            Some(DrawCommand::Stamp {
                center,
                radius,
                color,
            }) => {
                assert_eq!(*radius, 25.0);
                assert_eq!(*color, START);
                centers.push(*center);
            }
            other => panic!("expected a stamp, got {other:?}"),
        }
        render::draw(&mut canvas, outcome.command().unwrap());
    }

    assert_eq!(centers.len(), 10);
    assert_eq!(centers[0], Point::new(150.0, 100.0));
    for pair in centers.windows(2) {
        // far from every edge, so no axis is ever held
        assert_eq!((pair[1].x - pair[0].x).abs(), 1.0);
        assert_eq!((pair[1].y - pair[0].y).abs(), 1.0);
    }
    assert_eq!(state.shape.radius, 25.0);
    assert_eq!(state.color, START);
    assert!(canvas.count(START) > 0);
}

#[test]
fn walk_pinned_in_a_corner_never_escapes() {
    let mut rng = StdRng::seed_from_u64(77);
    let bounds = Bounds::new(60.0, 60.0);
    let mut state = fresh(bounds, true);
    state.shape.position = Point::new(25.5, 25.5);
    let flags = ToggleFlags::default();

    for _ in 0..10_000 {
        sim::tick(&mut state, &flags, &mut rng);
        let Point { x, y } = state.position();
        let r = state.shape.radius;
        assert!(x - r > 0.0 && x + r < bounds.width, "x {x}");
        assert!(y - r > 0.0 && y + r < bounds.height, "y {y}");
    }
}

#[test]
fn resizing_walk_stays_inside_the_canvas() {
    let bounds = Bounds::new(60.0, 60.0);
    let flags = ToggleFlags {
        size_change: true,
        ..ToggleFlags::default()
    };

    for smooth_size in [false, true] {
        let mut rng = StdRng::seed_from_u64(65);
        let config = SimConfig {
            smooth_size,
            ..SimConfig::default()
        };
        let mut state = SimState::new(bounds, config, START, true);

        for tick in 0..20_000 {
            sim::tick(&mut state, &flags, &mut rng);
            let Point { x, y } = state.position();
            let r = state.shape.radius;
            assert!(
                x - r >= 0.0 && x + r <= bounds.width,
                "tick {tick}: x {x} r {r} (smooth {smooth_size})"
            );
            assert!(
                y - r >= 0.0 && y + r <= bounds.height,
                "tick {tick}: y {y} r {r} (smooth {smooth_size})"
            );
        }
    }
}

#[test]
fn spinning_recolors_once_per_revolution() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut state = fresh(Bounds::new(200.0, 200.0), true);
    let mut canvas = PixelBuffer::new(200, 200, Palette::BLACK);
    let flags = ToggleFlags {
        spin_mode: true,
        ..ToggleFlags::default()
    };

    sim::run_ticks(&mut state, &flags, &mut rng, &mut canvas, 2_010);
    assert_eq!(state.revolutions, 4);
    assert!(state.spin_progress < std::f64::consts::TAU);
}

#[test]
fn pausing_freezes_the_brush_and_pulses_the_button() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut state = fresh(Bounds::new(200.0, 120.0), true);
    let mut flags = ToggleFlags {
        color_change: true,
        size_change: true,
        ..ToggleFlags::default()
    };

    for _ in 0..5 {
        sim::tick(&mut state, &flags, &mut rng);
    }
    state.toggle_pause();
    let frozen = (state.shape, state.color);
    let target = state.color;

    let mut last = Palette::WHITE;
    for _ in 0..300 {
        match sim::tick(&mut state, &flags, &mut rng) {
            TickOutcome::Pulsed { background } => last = background,
            other => panic!("paused tick drew: {other:?}"),
        }
    }
    assert_eq!((state.shape, state.color), frozen);
    // every channel is pulled toward the brush colour, never below it
    let (r, g, b) = last.channels();
    let (tr, tg, tb) = target.channels();
    assert!(r >= tr && g >= tg && b >= tb);

    // flags flipped while paused take effect on the first running tick
    flags.color_change = false;
    state.toggle_pause();
    assert_eq!(state.pause.direction(), Direction::RESET);
    assert_eq!(state.pause.background(), Palette::WHITE);
    let color_before = state.color;
    assert!(matches!(
        sim::tick(&mut state, &flags, &mut rng),
        TickOutcome::Drew { .. }
    ));
    assert_eq!(state.color, color_before);
}
