use crate::color::Rgb;
use crate::error::ConfigError;

/// The documented 24x24 demo map. Border walls are value 1.
#[rustfmt::skip]
pub const SAMPLE_MAP: [[u32; 24]; 24] = [
    [1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1],
    [1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,0,0,0,0,0,2,2,2,2,2,0,0,0,0,3,0,3,0,3,0,0,0,1],
    [1,0,0,0,0,0,2,0,0,0,2,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,0,0,0,0,0,2,0,0,0,2,0,0,0,0,3,0,0,0,3,0,0,0,1],
    [1,0,0,0,0,0,2,0,0,0,2,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,0,0,0,0,0,2,2,0,2,2,0,0,0,0,3,0,3,0,3,0,0,0,1],
    [1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,4,4,4,4,4,4,4,4,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,4,0,4,0,0,0,0,4,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,4,0,0,0,0,5,0,4,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,4,0,4,0,0,0,0,4,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,4,0,4,4,4,4,4,4,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,4,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,4,4,4,4,4,4,4,4,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1],
];

/// Immutable row-major tile grid. `0` is open floor, `n > 0` is a wall drawn
/// with palette entry `n - 1`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<u32>,
}

impl Grid {
    pub fn from_rows<R: AsRef<[u32]>>(rows: &[R]) -> Result<Self, ConfigError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.as_ref().len());
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyGrid);
        }

        let mut cells = Vec::with_capacity(width * height);
        for (row, r) in rows.iter().enumerate() {
            let r = r.as_ref();
            if r.len() != width {
                return Err(ConfigError::RaggedRow {
                    row,
                    len: r.len(),
                    expected: width,
                });
            }
            cells.extend_from_slice(r);
        }

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn sample() -> Self {
        Self {
            width: 24,
            height: 24,
            cells: SAMPLE_MAP.iter().flatten().copied().collect(),
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell value at `[row][col]`, or `None` when out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<u32> {
        if row < self.height && col < self.width {
            Some(self.cells[row * self.width + col])
        } else {
            None
        }
    }

    /// Signed lookup for ray walks that may step past the border.
    #[inline]
    pub fn get_signed(&self, row: i64, col: i64) -> Option<u32> {
        if row < 0 || col < 0 {
            return None;
        }
        self.get(row as usize, col as usize)
    }

    /// True for in-bounds cells holding `0`.
    #[inline]
    pub fn is_open(&self, row: usize, col: usize) -> bool {
        self.get(row, col) == Some(0)
    }

    pub fn max_value(&self) -> u32 {
        self.cells.iter().copied().max().unwrap_or(0)
    }
}

/// Wall colors, indexed by `wall_value - 1`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgb>,
    /// Drawn when a ray leaves the grid without striking a wall.
    border: Rgb,
}

impl Palette {
    pub fn new(colors: Vec<Rgb>, border: Rgb) -> Self {
        Self { colors, border }
    }

    /// RED, GREEN, BLUE, WHITE, YELLOW with a grey border.
    pub fn classic() -> Self {
        Self::new(
            vec![Rgb::RED, Rgb::GREEN, Rgb::BLUE, Rgb::WHITE, Rgb::YELLOW],
            Rgb::GREY,
        )
    }

    #[inline]
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    #[inline]
    pub fn border(&self) -> Rgb {
        self.border
    }

    /// Color for a wall value. `0` and values past the palette resolve to `None`.
    #[inline]
    pub fn wall_color(&self, value: u32) -> Option<Rgb> {
        let idx = (value as usize).checked_sub(1)?;
        self.colors.get(idx).copied()
    }
}

/// Grid and palette, checked against each other once so render passes can
/// trust every wall value has a color.
#[derive(Clone, Debug)]
pub struct World {
    grid: Grid,
    palette: Palette,
}

impl World {
    pub fn new(grid: Grid, palette: Palette) -> Result<Self, ConfigError> {
        let value = grid.max_value();
        if value as usize > palette.len() {
            return Err(ConfigError::PaletteTooShort {
                value,
                len: palette.len(),
            });
        }
        Ok(Self { grid, palette })
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_grid_is_walled_in() {
        let grid = Grid::sample();
        assert_eq!((grid.width(), grid.height()), (24, 24));
        for i in 0..24 {
            assert_eq!(grid.get(0, i), Some(1));
            assert_eq!(grid.get(23, i), Some(1));
            assert_eq!(grid.get(i, 0), Some(1));
            assert_eq!(grid.get(i, 23), Some(1));
        }
        assert_eq!(grid.get(18, 6), Some(5));
        assert_eq!(grid.max_value(), 5);
    }

    #[test]
    fn lookups_outside_grid_are_none() {
        let grid = Grid::sample();
        assert_eq!(grid.get(24, 0), None);
        assert_eq!(grid.get(0, 24), None);
        assert_eq!(grid.get_signed(-1, 3), None);
        assert_eq!(grid.get_signed(3, -1), None);
        assert!(!grid.is_open(30, 30));
        assert!(grid.is_open(12, 22));
    }

    #[test]
    fn from_rows_rejects_ragged_and_empty() {
        let empty: [[u32; 0]; 0] = [];
        assert!(matches!(Grid::from_rows(&empty[..]), Err(ConfigError::EmptyGrid)));

        let rows = vec![vec![1, 1, 1], vec![1, 0]];
        assert!(matches!(
            Grid::from_rows(&rows[..]),
            Err(ConfigError::RaggedRow {
                row: 1,
                len: 2,
                expected: 3
            })
        ));
    }

    #[test]
    fn from_rows_matches_sample() {
        assert_eq!(Grid::from_rows(&SAMPLE_MAP[..]).unwrap(), Grid::sample());
    }

    #[test]
    fn palette_index_is_value_minus_one() {
        let palette = Palette::classic();
        assert_eq!(palette.wall_color(0), None);
        assert_eq!(palette.wall_color(1), Some(Rgb::RED));
        assert_eq!(palette.wall_color(5), Some(Rgb::YELLOW));
        assert_eq!(palette.wall_color(6), None);
    }

    #[test]
    fn world_rejects_short_palette() {
        let palette = Palette::new(vec![Rgb::RED, Rgb::GREEN], Rgb::GREY);
        let err = World::new(Grid::sample(), palette).unwrap_err();
        assert!(matches!(err, ConfigError::PaletteTooShort { value: 5, len: 2 }));
    }
}
