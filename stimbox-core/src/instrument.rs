//! The audio collaborator boundary.
//!
//! The grid schedules and unschedules notes through this trait without
//! knowing how (or whether) they are rendered to audio. The instrument's
//! transport runs on its own clock, independent of the animation frames.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use thiserror::Error;

/// Opaque id for a scheduled note, minted by the instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NoteHandle(u64);

impl NoteHandle {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Error)]
pub enum InstrumentError {
    /// Scheduling against a disposed instrument is a lifecycle bug in the
    /// caller and fails loudly instead of corrupting state.
    #[error("instrument has been disposed")]
    Disposed,
}

pub trait Instrument {
    /// Schedules the note for tile `(col, row)` to play whenever the
    /// transport crosses that column.
    fn schedule_note(&mut self, col: usize, row: usize) -> Result<NoteHandle, InstrumentError>;

    /// Cancels a previously scheduled note. Unknown handles are ignored.
    fn unschedule_note(&mut self, handle: NoteHandle);

    /// Cancels every scheduled note.
    fn clear_notes(&mut self);

    /// Column the transport playhead is currently over, if playing.
    fn playhead_column(&self) -> Option<usize>;

    fn dispose(&mut self);
}

/// Shared-ownership instruments, so a caller can keep a handle for driving
/// the playhead while the grid owns the collaborator slot.
impl<I: Instrument> Instrument for Rc<RefCell<I>> {
    fn schedule_note(&mut self, col: usize, row: usize) -> Result<NoteHandle, InstrumentError> {
        self.borrow_mut().schedule_note(col, row)
    }

    fn unschedule_note(&mut self, handle: NoteHandle) {
        self.borrow_mut().unschedule_note(handle)
    }

    fn clear_notes(&mut self) {
        self.borrow_mut().clear_notes()
    }

    fn playhead_column(&self) -> Option<usize> {
        self.borrow().playhead_column()
    }

    fn dispose(&mut self) {
        self.borrow_mut().dispose()
    }
}

/// An instrument that records scheduling calls instead of making sound.
/// Used by the frontend (which has no audio backend) and by tests.
#[derive(Debug, Default)]
pub struct RecordingInstrument {
    notes: HashMap<u64, (usize, usize)>,
    next_handle: u64,
    playhead: Option<usize>,
    disposed: bool,
}

impl RecordingInstrument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Externally driven transport position.
    pub fn set_playhead(&mut self, column: Option<usize>) {
        self.playhead = column;
    }

    pub fn note_count(&self) -> usize {
        self.notes.len()
    }

    /// The scheduled `(col, row)` pairs, sorted for stable assertions.
    pub fn scheduled(&self) -> Vec<(usize, usize)> {
        let mut pairs: Vec<_> = self.notes.values().copied().collect();
        pairs.sort_unstable();
        pairs
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

impl Instrument for RecordingInstrument {
    fn schedule_note(&mut self, col: usize, row: usize) -> Result<NoteHandle, InstrumentError> {
        if self.disposed {
            return Err(InstrumentError::Disposed);
        }
        let handle = NoteHandle::new(self.next_handle);
        self.next_handle += 1;
        self.notes.insert(handle.raw(), (col, row));
        Ok(handle)
    }

    fn unschedule_note(&mut self, handle: NoteHandle) {
        self.notes.remove(&handle.raw());
    }

    fn clear_notes(&mut self) {
        self.notes.clear();
    }

    fn playhead_column(&self) -> Option<usize> {
        self.playhead
    }

    fn dispose(&mut self) {
        self.notes.clear();
        self.playhead = None;
        self.disposed = true;
    }
}
