use std::time::Duration;

pub const DEFAULT_DIMS: (usize, usize) = (20, 20);
pub const MIN_DIMS: (usize, usize) = (10, 10);
pub const MAX_DIMS: (usize, usize) = (100, 100);

/// Pause after every carved cell or solver step. Lower is faster.
pub const DEFAULT_DRAWING_SPEED: Duration = Duration::from_millis(5);

/// Smallest side either generator can work with: the backtracker needs a start
/// at least 2 cells away from every border.
pub const GENERATABLE_FLOOR: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("rows {rows} outside allowed range {min}..={max}")]
    RowsOutOfRange { rows: usize, min: usize, max: usize },
    #[display("columns {columns} outside allowed range {min}..={max}")]
    ColumnsOutOfRange {
        columns: usize,
        min: usize,
        max: usize,
    },
    #[display("dimension bounds must allow at least {floor}x{floor} grids, got minimum {min}")]
    BoundsTooSmall { min: usize, floor: usize },
    #[display("cannot bind a solver: no maze has been generated or loaded")]
    NoMaze,
    #[display("cannot bind a solver: maze has no start cell")]
    MissingStart,
}

/// Allowed generation sizes. Loaded files only need positive dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DimensionBounds {
    pub min_rows: usize,
    pub max_rows: usize,
    pub min_columns: usize,
    pub max_columns: usize,
}

impl Default for DimensionBounds {
    fn default() -> Self {
        Self {
            min_rows: MIN_DIMS.0,
            max_rows: MAX_DIMS.0,
            min_columns: MIN_DIMS.1,
            max_columns: MAX_DIMS.1,
        }
    }
}

impl DimensionBounds {
    pub fn validate(&self, rows: usize, columns: usize) -> Result<(), ConfigError> {
        let floor = self.min_rows.min(self.min_columns);
        if floor < GENERATABLE_FLOOR {
            return Err(ConfigError::BoundsTooSmall {
                min: floor,
                floor: GENERATABLE_FLOOR,
            });
        }
        if rows < self.min_rows || rows > self.max_rows {
            return Err(ConfigError::RowsOutOfRange {
                rows,
                min: self.min_rows,
                max: self.max_rows,
            });
        }
        if columns < self.min_columns || columns > self.max_columns {
            return Err(ConfigError::ColumnsOutOfRange {
                columns,
                min: self.min_columns,
                max: self.max_columns,
            });
        }

        Ok(())
    }
}

/// Everything the generator and the solver runner need to know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeConfig {
    pub rows: usize,
    pub columns: usize,
    /// Carve with the backtracker so a goal is always reachable.
    pub ensure_solvable: bool,
    pub drawing_speed: Duration,
    /// Fixed seed for reproducible mazes, entropy otherwise.
    pub seed: Option<u64>,
    pub bounds: DimensionBounds,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_DIMS.0,
            columns: DEFAULT_DIMS.1,
            ensure_solvable: true,
            drawing_speed: DEFAULT_DRAWING_SPEED,
            seed: None,
            bounds: DimensionBounds::default(),
        }
    }
}

impl MazeConfig {
    pub fn with_dims(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bounds.validate(self.rows, self.columns)
    }
}
