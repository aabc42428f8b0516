// patterns.rs - Named templates and their placement on the grid

use crate::error::{EngineError, Result};
use crate::grid::{GRID_HEIGHT, GRID_WIDTH, Grid};

/// Immutable template. `cells` are `(row, col)` offsets from the top-left corner.
#[derive(Debug, PartialEq, Eq)]
pub struct Pattern {
    pub key: &'static str,
    pub name: &'static str,
    pub width: usize,
    pub height: usize,
    pub cells: &'static [(usize, usize)],
}

pub const GLIDER: Pattern = Pattern {
    key: "glider",
    name: "Glider",
    width: 3,
    height: 3,
    cells: &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)],
};

pub const BLINKER: Pattern = Pattern {
    key: "blinker",
    name: "Blinker",
    width: 3,
    height: 1,
    cells: &[(0, 0), (0, 1), (0, 2)],
};

pub const TOAD: Pattern = Pattern {
    key: "toad",
    name: "Toad",
    width: 4,
    height: 2,
    cells: &[(0, 1), (0, 2), (0, 3), (1, 0), (1, 1), (1, 2)],
};

pub const BEACON: Pattern = Pattern {
    key: "beacon",
    name: "Beacon",
    width: 4,
    height: 4,
    cells: &[(0, 0), (0, 1), (1, 0), (2, 3), (3, 2), (3, 3)],
};

pub const GOSPER_GUN: Pattern = Pattern {
    key: "gosperGun",
    name: "Gosper Gun",
    width: 36,
    height: 9,
    cells: &[
        (5, 1), (5, 2), (6, 1), (6, 2), (5, 11), (6, 11), (7, 11), (4, 12), (8, 12),
        (3, 13), (9, 13), (3, 14), (9, 14), (6, 15), (4, 16), (8, 16), (5, 17), (6, 17),
        (7, 17), (6, 18), (3, 21), (4, 21), (5, 21), (3, 22), (4, 22), (5, 22), (2, 23),
        (6, 23), (1, 25), (2, 25), (6, 25), (7, 25), (3, 35), (4, 35), (3, 36), (4, 36),
    ],
};

// The declared 5x4 box is smaller than the cells it lists; kept as published.
pub const LIGHTWEIGHT_SPACESHIP: Pattern = Pattern {
    key: "lwss",
    name: "Lightweight Spaceship",
    width: 5,
    height: 4,
    cells: &[(0, 1), (0, 4), (1, 0), (2, 0), (3, 0), (3, 4), (2, 5), (1, 5)],
};

pub const PATTERNS: &[Pattern] = &[
    GLIDER,
    BLINKER,
    TOAD,
    BEACON,
    GOSPER_GUN,
    LIGHTWEIGHT_SPACESHIP,
];

pub fn find(key: &str) -> Result<&'static Pattern> {
    PATTERNS
        .iter()
        .find(|pattern| pattern.key == key)
        .ok_or_else(|| EngineError::UnknownPattern(key.to_string()))
}

/// Top-left origin that centers `pattern` on the grid. Negative when it does not fit.
pub fn centered_origin(pattern: &Pattern) -> (isize, isize) {
    let start_row = (GRID_HEIGHT as isize - pattern.height as isize).div_euclid(2);
    let start_col = (GRID_WIDTH as isize - pattern.width as isize).div_euclid(2);
    (start_row, start_col)
}

/// Grid cell addressed by a flat row-major drop index.
pub fn cell_for_drop_index(index: usize) -> (usize, usize) {
    (index / GRID_WIDTH, index % GRID_WIDTH)
}

/// Sets every pattern cell alive relative to `(start_row, start_col)`.
///
/// Cells landing outside the grid are dropped. Returns how many cells were placed.
pub fn place(grid: &mut Grid, pattern: &Pattern, start_row: isize, start_col: isize) -> usize {
    let mut placed = 0;
    for &(x, y) in pattern.cells {
        let row = start_row + x as isize;
        let col = start_col + y as isize;
        if row < 0 || col < 0 {
            continue;
        }
        if grid.set(row as usize, col as usize, true).is_ok() {
            placed += 1;
        }
    }
    placed
}

/// Overlays `pattern` centered on the grid.
pub fn load(grid: &mut Grid, pattern: &Pattern) -> usize {
    let (start_row, start_col) = centered_origin(pattern);
    place(grid, pattern, start_row, start_col)
}

/// Overlays `pattern` with its top-left corner at the anchor.
pub fn drop_at(grid: &mut Grid, pattern: &Pattern, anchor_row: isize, anchor_col: isize) -> usize {
    place(grid, pattern, anchor_row, anchor_col)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::step;

    #[test]
    fn catalog_has_six_unique_keys() {
        assert_eq!(PATTERNS.len(), 6);
        for (i, a) in PATTERNS.iter().enumerate() {
            for b in &PATTERNS[i + 1..] {
                assert_ne!(a.key, b.key);
            }
        }
        assert_eq!(GOSPER_GUN.cells.len(), 36);
        assert_eq!(LIGHTWEIGHT_SPACESHIP.cells.len(), 8);
    }

    #[test]
    fn find_by_key() {
        assert_eq!(find("lwss").unwrap().name, "Lightweight Spaceship");
        assert!(matches!(find("pulsar"), Err(EngineError::UnknownPattern(k)) if k == "pulsar"));
    }

    #[test]
    fn centered_blinker_lands_on_row_14() {
        let mut grid = Grid::new();
        assert_eq!(load(&mut grid, &BLINKER), 3);
        let cells: Vec<_> = grid.live_cells().collect();
        assert_eq!(cells, vec![(14, 18), (14, 19), (14, 20)]);
    }

    #[test]
    fn centered_gun_origin() {
        assert_eq!(centered_origin(&GOSPER_GUN), (10, 2));
        let mut grid = Grid::new();
        assert_eq!(load(&mut grid, &GOSPER_GUN), 36);
        assert!(grid.get(15, 3).unwrap());
        assert!(grid.get(14, 38).unwrap());
    }

    #[test]
    fn oversized_pattern_centers_with_floor() {
        let wide = Pattern {
            key: "wide",
            name: "Wide",
            width: 43,
            height: 1,
            cells: &[(0, 0), (0, 1), (0, 2), (0, 41)],
        };
        assert_eq!(centered_origin(&wide), (14, -2));
        let mut grid = Grid::new();
        assert_eq!(load(&mut grid, &wide), 2);
        assert!(grid.get(14, 0).unwrap());
        assert!(grid.get(14, 39).unwrap());
    }

    #[test]
    fn drop_clips_at_the_far_edge() {
        let mut grid = Grid::new();
        let placed = drop_at(&mut grid, &GLIDER, 28, 38);
        // (1,0)->(29,38), (2,1) off, (0,2) off, (1,2) off, (2,2) off
        assert_eq!(placed, 1);
        assert_eq!(grid.live_cells().collect::<Vec<_>>(), vec![(29, 38)]);
    }

    #[test]
    fn drop_overlays_without_clearing() {
        let mut grid = Grid::from_live_cells(&[(0, 0)]).unwrap();
        drop_at(&mut grid, &BLINKER, 5, 5);
        assert!(grid.get(0, 0).unwrap());
        assert_eq!(grid.population(), 4);
    }

    #[test]
    fn negative_anchor_drops_cells() {
        let mut grid = Grid::new();
        assert_eq!(drop_at(&mut grid, &BLINKER, -1, 0), 0);
        assert_eq!(drop_at(&mut grid, &BLINKER, 0, -2), 1);
        assert!(grid.get(0, 0).unwrap());
    }

    #[test]
    fn drop_index_maps_row_major() {
        assert_eq!(cell_for_drop_index(0), (0, 0));
        assert_eq!(cell_for_drop_index(41), (1, 1));
        assert_eq!(cell_for_drop_index(1199), (29, 39));
    }

    #[test]
    fn toad_and_beacon_have_period_two() {
        for pattern in [&TOAD, &BEACON] {
            let mut grid = Grid::new();
            load(&mut grid, pattern);
            let once = step(&grid, false);
            assert_ne!(once, grid, "{}", pattern.name);
            assert_eq!(step(&once, false), grid, "{}", pattern.name);
        }
    }
}
