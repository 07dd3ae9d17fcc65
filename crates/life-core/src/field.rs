//! Field — the grid of cells the simulation runs on.
//!
//! A `Field` is a `height × width` rectangle of boolean cells plus the
//! `active` flag that says whether the simulation is running or paused.
//!
//! # Design choices
//!
//! - **One contiguous buffer.** Cells live in a flat `Vec<bool>` indexed
//!   row-major (`y * width + x`). Rows are contiguous, so the step engine and
//!   the renderer both scan memory linearly, and there is no per-row
//!   allocation to pair up with a deallocation.
//!
//! - **Coordinates are `(y, x)`**, row first, matching how the grid is stored
//!   and how the terminal addresses rows. Every accessor is bounds-checked and
//!   reports [`LifeError::OutOfBounds`] rather than panicking.
//!
//! - **Equality ignores `active`.** Two fields are equal when their
//!   dimensions and cells match; whether the simulation is paused is display
//!   state, not field content, and it is not persisted.

use std::fmt;

use rand::Rng;

use crate::error::{LifeError, Result};

// ---------------------------------------------------------------------------
// Field
// ---------------------------------------------------------------------------

/// A rectangular grid of live/dead cells.
#[derive(Clone)]
pub struct Field {
    height: usize,
    width: usize,
    cells: Vec<bool>,
    active: bool,
}

impl Field {
    // -- Construction -------------------------------------------------------

    /// Create an all-dead field. The simulation starts active.
    ///
    /// # Errors
    ///
    /// Returns [`LifeError::InvalidDimensions`] if either dimension is zero
    /// or above `i32::MAX`, or if the cells cannot be allocated.
    pub fn new(height: usize, width: usize) -> Result<Self> {
        Ok(Self {
            height,
            width,
            cells: dead_cells(height, width)?,
            active: true,
        })
    }

    /// Build a field from row-major cells. Used by the persistence codec.
    pub(crate) fn from_cells(height: usize, width: usize, cells: Vec<bool>) -> Result<Self> {
        let count = check_dimensions(height, width)?;
        if cells.len() != count {
            return Err(LifeError::CorruptData(format!(
                "expected {count} cells for a {height}×{width} field, got {}",
                cells.len()
            )));
        }
        Ok(Self {
            height,
            width,
            cells,
            active: true,
        })
    }

    /// Build a field from a text pattern, one string per row.
    ///
    /// `#`, `O` and `*` are alive; anything else is dead. All rows must have
    /// the same length.
    ///
    /// ```
    /// use life_core::field::Field;
    ///
    /// let field = Field::from_pattern(&[".#.", ".#.", ".#."]).unwrap();
    /// assert_eq!(field.height(), 3);
    /// assert_eq!(field.population(), 3);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`LifeError::InvalidDimensions`] for an empty pattern and
    /// [`LifeError::CorruptData`] for ragged rows.
    pub fn from_pattern(rows: &[&str]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.chars().count());
        let count = check_dimensions(height, width)?;

        let mut cells = Vec::with_capacity(count);
        for (y, row) in rows.iter().enumerate() {
            let len = row.chars().count();
            if len != width {
                return Err(LifeError::CorruptData(format!(
                    "pattern row {y} has {len} cells, expected {width}"
                )));
            }
            cells.extend(row.chars().map(|ch| matches!(ch, '#' | 'O' | '*')));
        }
        Self::from_cells(height, width, cells)
    }

    // -- Dimensions & flags -------------------------------------------------

    /// Number of rows.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Number of columns.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Whether the simulation is running (as opposed to paused).
    #[inline]
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    #[inline]
    pub const fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Flip between running and paused. Returns the new state.
    pub const fn toggle_active(&mut self) -> bool {
        self.active = !self.active;
        self.active
    }

    /// Whether `(y, x)` lies inside the field.
    #[inline]
    #[must_use]
    pub const fn contains(&self, y: usize, x: usize) -> bool {
        y < self.height && x < self.width
    }

    // -- Cell access --------------------------------------------------------

    /// State of the cell at `(y, x)`.
    ///
    /// # Errors
    ///
    /// Returns [`LifeError::OutOfBounds`] outside `[0, height) × [0, width)`.
    pub fn get(&self, y: usize, x: usize) -> Result<bool> {
        let idx = self.index(y, x)?;
        Ok(self.cells[idx])
    }

    /// Set the cell at `(y, x)`. Touches nothing else.
    ///
    /// # Errors
    ///
    /// Returns [`LifeError::OutOfBounds`] outside the field.
    pub fn set(&mut self, y: usize, x: usize, alive: bool) -> Result<()> {
        let idx = self.index(y, x)?;
        self.cells[idx] = alive;
        Ok(())
    }

    /// Flip the cell at `(y, x)` and return its new state.
    ///
    /// # Errors
    ///
    /// Returns [`LifeError::OutOfBounds`] outside the field.
    pub fn toggle(&mut self, y: usize, x: usize) -> Result<bool> {
        let idx = self.index(y, x)?;
        self.cells[idx] = !self.cells[idx];
        Ok(self.cells[idx])
    }

    /// Unchecked read for callers that have already validated `(y, x)`.
    #[inline]
    pub(crate) fn alive_at(&self, y: usize, x: usize) -> bool {
        self.cells[y * self.width + x]
    }

    /// All cells in row-major order.
    #[inline]
    #[must_use]
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// One row of cells, or `None` if `y` is past the last row.
    #[must_use]
    pub fn row(&self, y: usize) -> Option<&[bool]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        Some(&self.cells[start..start + self.width])
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.cells.chunks_exact(self.width)
    }

    /// Number of live cells.
    #[must_use]
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    // -- Bulk mutation ------------------------------------------------------

    /// Reallocate to `new_height × new_width`, discarding every cell.
    ///
    /// # Errors
    ///
    /// Returns [`LifeError::InvalidDimensions`] under the same conditions as
    /// [`new`](Self::new); the field is left unchanged in that case.
    pub fn resize(&mut self, new_height: usize, new_width: usize) -> Result<()> {
        self.cells = dead_cells(new_height, new_width)?;
        self.height = new_height;
        self.width = new_width;
        Ok(())
    }

    /// Kill every cell.
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Set every cell alive or dead with probability ½, using the
    /// thread-local RNG.
    pub fn randomize(&mut self) {
        self.randomize_with(&mut rand::thread_rng());
    }

    /// Like [`randomize`](Self::randomize) but with a caller-supplied RNG,
    /// so a seeded generator reproduces the same field.
    pub fn randomize_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for cell in &mut self.cells {
            *cell = rng.gen_bool(0.5);
        }
    }

    /// Replace the whole generation at once. `next` must be the same size.
    pub(crate) fn replace_cells(&mut self, next: Vec<bool>) {
        debug_assert_eq!(next.len(), self.cells.len());
        self.cells = next;
    }

    // -- Helpers ------------------------------------------------------------

    fn index(&self, y: usize, x: usize) -> Result<usize> {
        if self.contains(y, x) {
            Ok(y * self.width + x)
        } else {
            Err(LifeError::OutOfBounds {
                y,
                x,
                height: self.height,
                width: self.width,
            })
        }
    }
}

/// Validate a `height × width` request and return its cell count.
///
/// Each dimension must be in `1..=i32::MAX` so it fits the save header, and
/// the product must not overflow `usize`.
pub(crate) fn check_dimensions(height: usize, width: usize) -> Result<usize> {
    let in_range = |n: usize| n > 0 && i32::try_from(n).is_ok();
    if in_range(height) && in_range(width) {
        if let Some(count) = height.checked_mul(width) {
            return Ok(count);
        }
    }
    Err(LifeError::InvalidDimensions { height, width })
}

/// An all-dead cell buffer. Allocation failure is reported, not aborted on.
fn dead_cells(height: usize, width: usize) -> Result<Vec<bool>> {
    let count = check_dimensions(height, width)?;
    let mut cells = Vec::new();
    cells
        .try_reserve_exact(count)
        .map_err(|_| LifeError::InvalidDimensions { height, width })?;
    cells.resize(count, false);
    Ok(cells)
}

impl PartialEq for Field {
    fn eq(&self, other: &Self) -> bool {
        self.height == other.height && self.width == other.width && self.cells == other.cells
    }
}

impl Eq for Field {}

/// Renders as rows of `#` (alive) and `.` (dead).
impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.rows().enumerate() {
            if y > 0 {
                f.write_str("\n")?;
            }
            for &alive in row {
                f.write_str(if alive { "#" } else { "." })?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Field {}×{} ({})",
            self.height,
            self.width,
            if self.active { "running" } else { "paused" }
        )?;
        fmt::Display::fmt(self, f)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    // -- Construction -------------------------------------------------------

    #[test]
    fn new_field_is_all_dead_and_active() {
        let field = Field::new(4, 7).unwrap();
        assert_eq!(field.height(), 4);
        assert_eq!(field.width(), 7);
        assert_eq!(field.cells().len(), 28);
        assert_eq!(field.population(), 0);
        assert!(field.is_active());
    }

    #[test]
    fn new_rejects_zero_dimensions() {
        assert!(matches!(
            Field::new(0, 5),
            Err(LifeError::InvalidDimensions { height: 0, width: 5 })
        ));
        assert!(Field::new(5, 0).is_err());
    }

    #[test]
    fn new_rejects_sides_the_save_header_cannot_hold() {
        let too_big = i32::MAX as usize + 1;
        assert!(matches!(
            Field::new(too_big, too_big),
            Err(LifeError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            Field::new(1, too_big),
            Err(LifeError::InvalidDimensions { height: 1, .. })
        ));
    }

    #[test]
    fn new_reports_unallocatable_field() {
        let side = i32::MAX as usize;
        assert!(matches!(
            Field::new(side, side),
            Err(LifeError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn resize_rejects_out_of_range_and_keeps_field() {
        let mut field = Field::from_pattern(&["#.", ".#"]).unwrap();
        assert!(field.resize(i32::MAX as usize + 1, 2).is_err());
        assert!(field.resize(0, 2).is_err());
        assert_eq!(field.height(), 2);
        assert_eq!(field.width(), 2);
        assert_eq!(field.to_string(), "#.\n.#");
    }

    #[test]
    fn from_pattern_reads_rows() {
        let field = Field::from_pattern(&["#..", ".O.", "..*"]).unwrap();
        assert!(field.get(0, 0).unwrap());
        assert!(field.get(1, 1).unwrap());
        assert!(field.get(2, 2).unwrap());
        assert_eq!(field.population(), 3);
    }

    #[test]
    fn from_pattern_rejects_ragged_rows() {
        assert!(matches!(
            Field::from_pattern(&["...", ".."]),
            Err(LifeError::CorruptData(_))
        ));
    }

    #[test]
    fn from_pattern_rejects_empty() {
        assert!(Field::from_pattern(&[]).is_err());
    }

    // -- Cell access --------------------------------------------------------

    #[test]
    fn set_then_get() {
        let mut field = Field::new(3, 3).unwrap();
        field.set(1, 2, true).unwrap();
        assert!(field.get(1, 2).unwrap());
        assert_eq!(field.population(), 1);
    }

    #[test]
    fn set_touches_single_cell() {
        let mut field = Field::new(2, 3).unwrap();
        field.set(1, 0, true).unwrap();
        assert_eq!(field.to_string(), "...\n#..");
    }

    #[test]
    fn get_out_of_bounds() {
        let field = Field::new(3, 4).unwrap();
        assert!(matches!(
            field.get(3, 0),
            Err(LifeError::OutOfBounds { y: 3, x: 0, height: 3, width: 4 })
        ));
        assert!(field.get(0, 4).is_err());
    }

    #[test]
    fn set_out_of_bounds_leaves_field_unchanged() {
        let mut field = Field::new(2, 2).unwrap();
        assert!(field.set(2, 2, true).is_err());
        assert_eq!(field.population(), 0);
    }

    #[test]
    fn toggle_flips_and_returns_new_state() {
        let mut field = Field::new(2, 2).unwrap();
        assert!(field.toggle(0, 1).unwrap());
        assert!(!field.toggle(0, 1).unwrap());
        assert!(field.toggle(5, 5).is_err());
    }

    #[test]
    fn rows_iterate_in_order() {
        let field = Field::from_pattern(&["#.", ".#", "##"]).unwrap();
        let rows: Vec<&[bool]> = field.rows().collect();
        assert_eq!(rows, vec![&[true, false][..], &[false, true][..], &[true, true][..]]);
        assert_eq!(field.row(2), Some(&[true, true][..]));
        assert_eq!(field.row(3), None);
    }

    // -- Flags --------------------------------------------------------------

    #[test]
    fn toggle_active_round_trips() {
        let mut field = Field::new(1, 1).unwrap();
        assert!(!field.toggle_active());
        assert!(!field.is_active());
        assert!(field.toggle_active());
    }

    #[test]
    fn equality_ignores_active_flag() {
        let a = Field::from_pattern(&["#."]).unwrap();
        let mut b = a.clone();
        b.set_active(false);
        assert_eq!(a, b);
    }

    // -- Bulk mutation ------------------------------------------------------

    #[test]
    fn resize_discards_contents() {
        let mut field = Field::from_pattern(&["##", "##"]).unwrap();
        field.resize(3, 5).unwrap();
        assert_eq!(field.height(), 3);
        assert_eq!(field.width(), 5);
        assert_eq!(field.population(), 0);
    }

    #[test]
    fn resize_to_zero_is_rejected_and_keeps_field() {
        let mut field = Field::from_pattern(&["##"]).unwrap();
        assert!(field.resize(0, 3).is_err());
        assert_eq!(field.width(), 2);
        assert_eq!(field.population(), 2);
    }

    #[test]
    fn clear_kills_everything() {
        let mut field = Field::from_pattern(&["#.#", "###"]).unwrap();
        field.clear();
        assert_eq!(field.population(), 0);
    }

    #[test]
    fn seeded_randomize_is_reproducible() {
        let mut a = Field::new(20, 30).unwrap();
        let mut b = Field::new(20, 30).unwrap();
        a.randomize_with(&mut ChaCha8Rng::seed_from_u64(7));
        b.randomize_with(&mut ChaCha8Rng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn randomize_produces_mixed_field() {
        let mut field = Field::new(40, 40).unwrap();
        field.randomize_with(&mut ChaCha8Rng::seed_from_u64(1));
        let pop = field.population();
        // 1600 fair coin flips: far outside these bounds is astronomically unlikely.
        assert!(pop > 600 && pop < 1000, "population {pop}");
    }

    #[test]
    fn randomize_keeps_dimensions_and_flag() {
        let mut field = Field::new(5, 9).unwrap();
        field.set_active(false);
        field.randomize();
        assert_eq!(field.cells().len(), 45);
        assert!(!field.is_active());
    }

    // -- Formatting ---------------------------------------------------------

    #[test]
    fn display_renders_grid() {
        let field = Field::from_pattern(&[".#.", "#.#"]).unwrap();
        assert_eq!(field.to_string(), ".#.\n#.#");
    }

    #[test]
    fn debug_includes_state() {
        let mut field = Field::new(1, 2).unwrap();
        field.set_active(false);
        let debug = format!("{field:?}");
        assert!(debug.contains("1×2"));
        assert!(debug.contains("paused"));
    }
}
