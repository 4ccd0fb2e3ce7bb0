//! Static occupancy map over integer cells
//!
//! Stored row-major: `occupied(col, row)` reads `rows[row][col]`. A grid is
//! only built from rectangular data with a fully occupied outer border, which
//! is what guarantees that every ray cast from inside it terminates.

use glam::IVec2;

use crate::error::MapError;

/// Reference map: 12x12 rooms joined by corridors
pub const REFERENCE_MAP: [[u8; 12]; 12] = [
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 1, 0, 1, 0, 0, 0, 0, 0, 1],
    [1, 1, 0, 1, 0, 0, 0, 1, 1, 0, 1, 1],
    [1, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 1],
    [1, 1, 0, 1, 0, 0, 0, 1, 1, 0, 1, 1],
    [1, 0, 0, 1, 0, 1, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
];

/// Immutable occupancy grid (0 = open, >0 = wall)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cols: usize,
    rows: usize,
    cells: Vec<u8>,
}

impl Grid {
    /// Build a grid from a table of rows, validating shape and border closure
    pub fn from_rows<R: AsRef<[u8]>>(table: &[R]) -> Result<Self, MapError> {
        let rows = table.len();
        let cols = table.first().map(|r| r.as_ref().len()).unwrap_or(0);
        if rows == 0 || cols == 0 {
            return Err(MapError::Empty);
        }

        let mut cells = Vec::with_capacity(cols * rows);
        for (row, values) in table.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != cols {
                return Err(MapError::Ragged {
                    row,
                    expected: cols,
                    found: values.len(),
                });
            }
            cells.extend_from_slice(values);
        }

        let grid = Self { cols, rows, cells };
        grid.check_border()?;
        if grid.first_open().is_none() {
            return Err(MapError::NoOpenCell);
        }
        log::info!("Grid loaded: {}x{} cells, {} walls", cols, rows, grid.wall_count());
        Ok(grid)
    }

    /// Parse a text map: one row per line, `#` or a digit 1-9 for walls,
    /// `0` or `.` for open cells. Whitespace between cells is ignored.
    pub fn parse(text: &str) -> Result<Self, MapError> {
        let mut table = Vec::new();
        for (row, line) in text.lines().filter(|l| !l.trim().is_empty()).enumerate() {
            let mut values = Vec::new();
            for (col, ch) in line.chars().filter(|c| !c.is_whitespace()).enumerate() {
                let value = match ch {
                    '.' | '0' => 0,
                    '#' => 1,
                    '1'..='9' => ch as u8 - b'0',
                    found => return Err(MapError::InvalidCell { row, col, found }),
                };
                values.push(value);
            }
            table.push(values);
        }
        Self::from_rows(&table)
    }

    /// Parse a JSON array of rows, e.g. `[[1,1,1],[1,0,1],[1,1,1]]`
    pub fn from_json(json: &str) -> Result<Self, MapError> {
        let table: Vec<Vec<u8>> = serde_json::from_str(json)?;
        Self::from_rows(&table)
    }

    /// The built-in 12x12 map
    pub fn reference() -> Self {
        Self {
            cols: REFERENCE_MAP[0].len(),
            rows: REFERENCE_MAP.len(),
            cells: REFERENCE_MAP.iter().flatten().copied().collect(),
        }
    }

    /// Number of columns (map width)
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of rows (map height)
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Is cell `(col, row)` a wall?
    ///
    /// # Panics
    /// If the cell lies outside the grid. Rays and moves can only leave the
    /// grid through a logic error, since the border is closed.
    pub fn occupied(&self, col: i32, row: i32) -> bool {
        match self.get(col, row) {
            Some(wall) => wall,
            None => panic!(
                "cell ({col}, {row}) outside {}x{} grid",
                self.cols, self.rows
            ),
        }
    }

    /// [`Grid::occupied`] for a cell vector
    #[inline]
    pub fn occupied_cell(&self, cell: IVec2) -> bool {
        self.occupied(cell.x, cell.y)
    }

    /// Occupancy of `(col, row)`, or `None` when out of bounds
    pub fn get(&self, col: i32, row: i32) -> Option<bool> {
        self.index(col, row).map(|i| self.cells[i] > 0)
    }

    /// Iterate over all wall cells in row-major order
    pub fn walls(&self) -> impl Iterator<Item = IVec2> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, v)| **v > 0)
            .map(|(i, _)| IVec2::new((i % self.cols) as i32, (i / self.cols) as i32))
    }

    /// First open cell in row-major order
    pub fn first_open(&self) -> Option<IVec2> {
        self.cells
            .iter()
            .position(|v| *v == 0)
            .map(|i| IVec2::new((i % self.cols) as i32, (i / self.cols) as i32))
    }

    fn wall_count(&self) -> usize {
        self.cells.iter().filter(|v| **v > 0).count()
    }

    fn index(&self, col: i32, row: i32) -> Option<usize> {
        if col < 0 || row < 0 || col as usize >= self.cols || row as usize >= self.rows {
            return None;
        }
        Some(row as usize * self.cols + col as usize)
    }

    fn check_border(&self) -> Result<(), MapError> {
        let last_col = self.cols - 1;
        let last_row = self.rows - 1;
        let border = (0..self.cols)
            .flat_map(|col| [(col, 0), (col, last_row)])
            .chain((0..self.rows).flat_map(|row| [(0, row), (last_col, row)]));

        for (col, row) in border {
            if self.cells[row * self.cols + col] == 0 {
                return Err(MapError::OpenBorder { col, row });
            }
        }
        Ok(())
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::reference()
    }
}
