//! Savestate codec tests: bit packing, round trips, and failure swallowing

use stimbox_core::savestate::{deserialize, serialize};
use stimbox_core::tests::test_helpers::recording_grid;

#[test]
fn test_empty_grid_serializes_to_empty_string() {
    let (grid, _instruments) = recording_grid(16, 16, 2);
    assert_eq!(serialize(&grid), "");
}

#[test]
fn test_single_tile_round_trip() {
    let (mut grid, _instruments) = recording_grid(16, 16, 2);
    grid.set_armed(3, 5, true).unwrap();

    let state = serialize(&grid);
    assert!(!state.is_empty());

    let (mut restored, _instruments) = recording_grid(16, 16, 2);
    deserialize(&mut restored, &state).unwrap();

    for x in 0..16 {
        for y in 0..16 {
            assert_eq!(
                restored.armed(x, y),
                (x, y) == (3, 5),
                "mismatch at ({x}, {y})"
            );
        }
    }
}

#[test]
fn test_round_trip_keeps_emptiness_only() {
    let (mut grid, _instruments) = recording_grid(16, 16, 2);
    grid.set_armed(0, 0, true).unwrap();
    grid.set_active_instrument(1);
    grid.set_armed(2, 3, true).unwrap();
    grid.set_armed(15, 15, true).unwrap();

    let state = serialize(&grid);
    let (mut restored, instruments) = recording_grid(16, 16, 2);
    deserialize(&mut restored, &state).unwrap();

    // Which instrument held each note is not preserved; everything lands on
    // the restoring grid's active instrument
    for x in 0..16 {
        for y in 0..16 {
            let expect = [(0, 0), (2, 3), (15, 15)].contains(&(x, y));
            assert_eq!(restored.armed(x, y), expect, "mismatch at ({x}, {y})");
        }
    }
    assert_eq!(instruments[0].borrow().note_count(), 3);
    assert_eq!(instruments[1].borrow().note_count(), 0);
}

#[test]
fn test_deserialize_disarms_as_well() {
    let (mut source, _instruments) = recording_grid(16, 16, 1);
    source.set_armed(2, 2, true).unwrap();
    let state = serialize(&source);

    let (mut grid, _instruments) = recording_grid(16, 16, 1);
    grid.set_armed(1, 1, true).unwrap();
    deserialize(&mut grid, &state).unwrap();

    assert!(!grid.armed(1, 1), "stale note must be disarmed");
    assert!(grid.armed(2, 2));
}

#[test]
fn test_malformed_input_is_swallowed() {
    let (mut grid, _instruments) = recording_grid(16, 16, 1);
    grid.set_armed(4, 4, true).unwrap();

    deserialize(&mut grid, "!!!not base64!!!").unwrap();

    // Nothing decoded, nothing changed
    assert!(grid.armed(4, 4));
}

#[test]
fn test_empty_string_means_nothing_to_restore() {
    let (mut grid, _instruments) = recording_grid(16, 16, 1);
    grid.set_armed(4, 4, true).unwrap();

    deserialize(&mut grid, "").unwrap();

    assert!(grid.armed(4, 4));
}

// Pins the linear order of the packing: index = x * height + y, bits laid
// out MSB-first. A regression to a width-strided (or hardcoded-8) layout
// changes these exact strings.
#[test]
fn test_bit_layout_is_x_major_msb_first() {
    // (0, 0) is linear index 0: the very first bit
    let (mut grid, _instruments) = recording_grid(16, 16, 1);
    grid.set_armed(0, 0, true).unwrap();
    let expected = format!("gAAA{}AAA=", "AAAA".repeat(9));
    assert_eq!(serialize(&grid), expected);

    // (1, 0) is linear index 16: first bit of the third byte
    let (mut grid, _instruments) = recording_grid(16, 16, 1);
    grid.set_armed(1, 0, true).unwrap();
    let expected = format!("AACA{}AAA=", "AAAA".repeat(9));
    assert_eq!(serialize(&grid), expected);

    // (0, 1) is linear index 1: second bit of the first byte
    let (mut grid, _instruments) = recording_grid(16, 16, 1);
    grid.set_armed(0, 1, true).unwrap();
    let expected = format!("QAAA{}AAA=", "AAAA".repeat(9));
    assert_eq!(serialize(&grid), expected);
}

#[test]
fn test_short_input_leaves_tail_tiles_untouched() {
    let (mut grid, _instruments) = recording_grid(16, 16, 1);
    grid.set_armed(15, 15, true).unwrap();

    // "gA==" is the single byte 0x80: bits for tiles 0..8 only. Tile (0, 0)
    // arms; every tile past the input, (15, 15) included, keeps its state.
    deserialize(&mut grid, "gA==").unwrap();

    assert!(grid.armed(0, 0));
    assert!(!grid.armed(0, 1), "only the set bit arms");
    assert!(grid.armed(15, 15), "tail tile beyond the input must survive");
}

#[test]
fn test_trailing_bits_are_ignored() {
    // A 3x3 grid has 9 tiles in 2 bytes; the 7 pad bits must not matter
    let (mut grid, _instruments) = recording_grid(3, 3, 1);
    grid.set_armed(2, 2, true).unwrap();

    let state = serialize(&grid);
    let (mut restored, _instruments) = recording_grid(3, 3, 1);
    deserialize(&mut restored, &state).unwrap();

    assert!(restored.armed(2, 2));
    assert_eq!(serialize(&restored), state);
}
