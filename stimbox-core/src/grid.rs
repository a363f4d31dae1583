use thiserror::Error;

use crate::instrument::{Instrument, InstrumentError, NoteHandle};

#[derive(Debug, Error)]
pub enum GridError {
    #[error("tile ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
    /// Mutating a disposed grid is a lifecycle bug in the caller.
    #[error("grid has been disposed")]
    Disposed,
    #[error(transparent)]
    Instrument(#[from] InstrumentError),
}

/// One cell of the sequencer grid: at most one scheduled-note handle per
/// instrument. Empty iff no instrument slot holds a note.
#[derive(Debug, Clone, Default)]
pub struct Tile {
    notes: Vec<Option<NoteHandle>>,
    note_count: usize,
}

impl Tile {
    fn with_slots(instruments: usize) -> Self {
        Self {
            notes: vec![None; instruments],
            note_count: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.note_count == 0
    }

    pub fn note(&self, instrument: usize) -> Option<NoteHandle> {
        self.notes.get(instrument).copied().flatten()
    }

    fn add_note(&mut self, instrument: usize, handle: NoteHandle) {
        if self.notes[instrument].replace(handle).is_none() {
            self.note_count += 1;
        }
    }

    fn remove_note(&mut self, instrument: usize) -> Option<NoteHandle> {
        let handle = self.notes[instrument].take();
        if handle.is_some() {
            self.note_count -= 1;
        }
        handle
    }

    fn clear(&mut self) {
        self.notes.fill(None);
        self.note_count = 0;
    }
}

/// 2-D matrix of tiles that arms and disarms notes against its instrument
/// collaborators.
///
/// Tiles are addressed by the linear index `x · height + y`; the savestate
/// codec packs bits in exactly this order.
pub struct Grid {
    tiles: Vec<Tile>,
    width: usize,
    height: usize,
    current_instrument: usize,
    instruments: Vec<Box<dyn Instrument>>,
    disposed: bool,
}

impl Grid {
    pub fn new(width: usize, height: usize, instruments: Vec<Box<dyn Instrument>>) -> Self {
        let tiles = vec![Tile::with_slots(instruments.len()); width * height];
        Self {
            tiles,
            width,
            height,
            current_instrument: 0,
            instruments,
            disposed: false,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn instrument_count(&self) -> usize {
        self.instruments.len()
    }

    pub fn current_instrument(&self) -> usize {
        self.current_instrument
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Linear index of a tile coordinate (x-major, height as the stride).
    pub fn coord_to_index(&self, x: usize, y: usize) -> usize {
        x * self.height + y
    }

    /// Inverse of [`coord_to_index`](Self::coord_to_index).
    pub fn index_to_coord(&self, index: usize) -> (usize, usize) {
        (index / self.height, index % self.height)
    }

    pub fn tile(&self, x: usize, y: usize) -> Option<&Tile> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.tiles.get(self.coord_to_index(x, y))
    }

    /// Whether the active instrument has a note armed at `(x, y)`.
    /// Out-of-range coordinates read as unarmed.
    pub fn armed(&self, x: usize, y: usize) -> bool {
        self.tile(x, y)
            .is_some_and(|tile| tile.note(self.current_instrument).is_some())
    }

    /// Arms or disarms the active instrument's note at `(x, y)`. Arming an
    /// armed tile or disarming a disarmed one is a no-op.
    pub fn set_armed(&mut self, x: usize, y: usize, on: bool) -> Result<(), GridError> {
        if self.disposed {
            return Err(GridError::Disposed);
        }
        let index = self.index_checked(x, y)?;
        if on == self.armed(x, y) {
            return Ok(());
        }
        if on {
            let Some(instrument) = self.instruments.get_mut(self.current_instrument) else {
                log::warn!("no instrument to schedule against; tile left unarmed");
                return Ok(());
            };
            let handle = instrument.schedule_note(x, y)?;
            self.tiles[index].add_note(self.current_instrument, handle);
        } else if let Some(handle) = self.tiles[index].remove_note(self.current_instrument) {
            if let Some(instrument) = self.instruments.get_mut(self.current_instrument) {
                instrument.unschedule_note(handle);
            }
        }
        Ok(())
    }

    pub fn toggle_armed(&mut self, x: usize, y: usize) -> Result<(), GridError> {
        let armed = self.armed(x, y);
        self.set_armed(x, y, !armed)
    }

    /// Switches which instrument subsequent arm operations target.
    /// An out-of-range index is logged and ignored.
    pub fn set_active_instrument(&mut self, index: usize) {
        if index >= self.instruments.len() {
            log::warn!("tried to switch to nonexistent instrument {index}");
        } else {
            self.current_instrument = index;
        }
    }

    /// Disarms every tile for every instrument and cancels all pending
    /// scheduled notes.
    pub fn clear_all(&mut self) -> Result<(), GridError> {
        if self.disposed {
            return Err(GridError::Disposed);
        }
        for tile in &mut self.tiles {
            tile.clear();
        }
        for instrument in &mut self.instruments {
            instrument.clear_notes();
        }
        Ok(())
    }

    /// Transport position of the active instrument, if any.
    pub fn playhead_column(&self) -> Option<usize> {
        self.instruments
            .get(self.current_instrument)?
            .playhead_column()
    }

    /// Tears down the grid and its instruments. Safe to call repeatedly.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        for tile in &mut self.tiles {
            tile.clear();
        }
        for instrument in &mut self.instruments {
            instrument.clear_notes();
            instrument.dispose();
        }
        self.disposed = true;
    }

    fn index_checked(&self, x: usize, y: usize) -> Result<usize, GridError> {
        if x >= self.width || y >= self.height {
            return Err(GridError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(self.coord_to_index(x, y))
    }
}
