//! Cloth grid behavior through the public API

mod common;

use approx::assert_relative_eq;
use rain_cloth_core::{ClothConfig, ClothGrid, Forcing, Seconds, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn still() -> Forcing {
    Forcing {
        gravity: 0.0,
        wind: Vec3::zeros(),
    }
}

#[test]
fn pins_never_move_for_any_step_sequence() {
    let mut rng = StdRng::seed_from_u64(300);
    let mut grid = ClothGrid::new(&ClothConfig::default());
    let anchors = [(0, 0), (5, 0), (10, 0)].map(|(c, r)| (c, r, grid.position(c, r)));

    for tick in 0..2000 {
        let forcing = Forcing {
            gravity: 2.0,
            wind: Vec3::new(rng.random_range(-4.0..4.0), 0.0, rng.random_range(-4.0..4.0)),
        };
        // Mostly frame-sized steps with an occasional stall
        let dt = if tick % 250 == 0 {
            0.2
        } else {
            rng.random_range(0.001..0.04)
        };
        grid.step(Seconds::new(dt), &forcing);

        for &(c, r, start) in &anchors {
            assert!(grid.is_pinned(c, r));
            assert_eq!(grid.position(c, r), start, "pin ({c}, {r}) moved at tick {tick}");
        }
    }
}

#[test]
fn relaxed_grid_only_damps() {
    // Unit spacing: every tie sits exactly at rest length, so nothing pulls
    let config = ClothConfig {
        spacing_x: 1.0,
        ..ClothConfig::default()
    };

    for dt in [0.001, 0.016, 0.1, 1.0, 4.0] {
        let mut grid = ClothGrid::new(&config);
        let kick = Vec3::new(0.003, -0.002, 0.001);
        grid.set_velocity(7, 6, kick);

        grid.step(Seconds::new(dt), &still());

        let expected = kick.norm() * (1.0 - 0.3 * dt).max(0.0);
        assert_relative_eq!(grid.velocity(7, 6).norm(), expected, epsilon = 1e-15);
    }
}

#[test]
fn pull_uses_start_of_tick_positions() {
    // A chain of three free cells with the middle one displaced. The outer
    // cells must both be pulled by the same amount, regardless of the order
    // cells are visited in.
    let config = ClothConfig {
        cols: 3,
        rows: 1,
        spacing_x: 1.0,
        pinned: Vec::new(),
        ..ClothConfig::default()
    };
    let mut grid = ClothGrid::new(&config);
    grid.set_position(1, 0, Vec3::new(1.0, 0.0, 1.5));

    grid.step(Seconds::new(0.01), &still());

    let left = grid.velocity(0, 0);
    let right = grid.velocity(2, 0);
    assert_relative_eq!(left.z, right.z, epsilon = 1e-15);
    assert_relative_eq!(left.x, -right.x, epsilon = 1e-15);
    assert!(left.z > 0.0);
    assert_eq!(grid.velocity(1, 0).x, 0.0);
}

#[test]
fn wind_billows_the_cloth() {
    let mut grid = ClothGrid::new(&ClothConfig::default());
    let forcing = Forcing {
        gravity: 2.0,
        wind: Vec3::new(0.0, 0.0, 3.0),
    };
    for _ in 0..300 {
        grid.step(Seconds::new(1.0 / 60.0), &forcing);
    }
    assert!(grid.position(5, 9).z > 0.5, "z {}", grid.position(5, 9).z);
    assert_relative_eq!(grid.position(5, 0), Vec3::new(6.0, 0.0, 0.0), epsilon = 1e-12);
}

#[test]
#[should_panic(expected = "outside the 11x10 grid")]
fn out_of_range_coordinates_fail_fast() {
    let grid = ClothGrid::new(&ClothConfig::default());
    let _ = grid.position(3, 10);
}
