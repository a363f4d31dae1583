//! Grid arming, instrument switching, and lifecycle tests

use stimbox_core::grid::GridError;
use stimbox_core::instrument::{Instrument, InstrumentError};
use stimbox_core::tests::test_helpers::recording_grid;

#[test]
fn test_arming_schedules_a_note() {
    let (mut grid, instruments) = recording_grid(16, 16, 2);

    grid.set_armed(3, 5, true).unwrap();

    assert!(grid.armed(3, 5));
    assert_eq!(instruments[0].borrow().scheduled(), vec![(3, 5)]);
    assert_eq!(instruments[1].borrow().note_count(), 0);
}

#[test]
fn test_arming_is_idempotent() {
    let (mut grid, instruments) = recording_grid(16, 16, 1);

    grid.set_armed(3, 5, true).unwrap();
    grid.set_armed(3, 5, true).unwrap();

    // The second arm is a no-op: still exactly one scheduled note
    assert_eq!(instruments[0].borrow().note_count(), 1);

    grid.set_armed(3, 5, false).unwrap();
    grid.set_armed(3, 5, false).unwrap();
    assert!(!grid.armed(3, 5));
    assert_eq!(instruments[0].borrow().note_count(), 0);
}

#[test]
fn test_toggle() {
    let (mut grid, _instruments) = recording_grid(16, 16, 1);

    grid.toggle_armed(0, 0).unwrap();
    assert!(grid.armed(0, 0));
    grid.toggle_armed(0, 0).unwrap();
    assert!(!grid.armed(0, 0));
}

#[test]
fn test_arm_state_is_per_instrument() {
    let (mut grid, instruments) = recording_grid(16, 16, 2);

    grid.set_armed(1, 1, true).unwrap();
    grid.set_active_instrument(1);

    // The other instrument's note doesn't read as armed here, but the tile
    // is not empty either
    assert!(!grid.armed(1, 1));
    assert!(!grid.tile(1, 1).unwrap().is_empty());

    grid.set_armed(1, 1, true).unwrap();
    assert_eq!(instruments[1].borrow().scheduled(), vec![(1, 1)]);

    grid.set_armed(1, 1, false).unwrap();
    // Instrument 0's note survives
    assert!(!grid.tile(1, 1).unwrap().is_empty());
    assert_eq!(instruments[0].borrow().note_count(), 1);
}

#[test]
fn test_nonexistent_instrument_is_ignored() {
    let (mut grid, _instruments) = recording_grid(16, 16, 2);

    grid.set_active_instrument(5);

    // Warned and ignored; state unchanged
    assert_eq!(grid.current_instrument(), 0);
}

#[test]
fn test_clear_all_cancels_everything() {
    let (mut grid, instruments) = recording_grid(16, 16, 2);

    grid.set_armed(0, 0, true).unwrap();
    grid.set_armed(4, 7, true).unwrap();
    grid.set_active_instrument(1);
    grid.set_armed(9, 2, true).unwrap();

    grid.clear_all().unwrap();

    for x in 0..16 {
        for y in 0..16 {
            assert!(grid.tile(x, y).unwrap().is_empty());
        }
    }
    assert_eq!(instruments[0].borrow().note_count(), 0);
    assert_eq!(instruments[1].borrow().note_count(), 0);
}

#[test]
fn test_out_of_bounds_is_an_error() {
    let (mut grid, _instruments) = recording_grid(16, 16, 1);

    let err = grid.set_armed(16, 0, true).unwrap_err();
    assert!(matches!(err, GridError::OutOfBounds { .. }));

    // Queries are lenient
    assert!(!grid.armed(16, 0));
}

#[test]
fn test_dispose_is_idempotent_and_final() {
    let (mut grid, instruments) = recording_grid(16, 16, 2);
    grid.set_armed(3, 3, true).unwrap();

    grid.dispose();
    grid.dispose();

    assert!(grid.is_disposed());
    assert!(instruments[0].borrow().is_disposed());
    assert!(instruments[1].borrow().is_disposed());

    // Mutating a disposed grid is a caller bug and fails loudly
    assert!(matches!(
        grid.set_armed(0, 0, true),
        Err(GridError::Disposed)
    ));
    assert!(matches!(grid.clear_all(), Err(GridError::Disposed)));
}

#[test]
fn test_disposed_instrument_error_propagates() {
    let (mut grid, instruments) = recording_grid(16, 16, 1);

    instruments[0].borrow_mut().dispose();

    let err = grid.set_armed(0, 0, true).unwrap_err();
    assert!(matches!(
        err,
        GridError::Instrument(InstrumentError::Disposed)
    ));
    assert!(!grid.armed(0, 0), "failed arm must not leave state behind");
}

#[test]
fn test_playhead_follows_active_instrument() {
    let (grid, instruments) = recording_grid(16, 16, 2);

    instruments[0].borrow_mut().set_playhead(Some(3));
    assert_eq!(grid.playhead_column(), Some(3));

    instruments[0].borrow_mut().set_playhead(None);
    assert_eq!(grid.playhead_column(), None);
}

#[test]
fn test_recording_instrument_rejects_after_dispose() {
    let mut instrument = stimbox_core::RecordingInstrument::new();
    let handle = instrument.schedule_note(1, 2).unwrap();
    instrument.unschedule_note(handle);

    instrument.dispose();
    assert!(matches!(
        instrument.schedule_note(0, 0),
        Err(InstrumentError::Disposed)
    ));
}
