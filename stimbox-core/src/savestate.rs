//! Savestate codec: the grid's "emptiness" bitmap packed into a base64
//! string compact enough for a URL fragment.
//!
//! One bit per tile in grid linear order, most significant bit first within
//! each byte. The bit records whether *any* instrument holds a note at the
//! tile; which instrument is not preserved.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::grid::{Grid, GridError};

/// Packs the grid into a savestate string. A grid with no armed tiles
/// serializes to the empty string.
pub fn serialize(grid: &Grid) -> String {
    let len = grid.width() * grid.height();
    let mut bytes = vec![0u8; len.div_ceil(8)];
    let mut any = false;
    for index in 0..len {
        let (x, y) = grid.index_to_coord(index);
        let on = grid.tile(x, y).is_some_and(|tile| !tile.is_empty());
        if on {
            bytes[index / 8] |= 0x80 >> (index % 8);
            any = true;
        }
    }
    if !any {
        return String::new();
    }
    STANDARD.encode(&bytes)
}

/// Applies a savestate string to the grid, arming and disarming tiles
/// through the active instrument to match the stored bitmap.
///
/// Undecodable input is swallowed (logged at debug level); whatever tiles
/// were mutated before the failure stay mutated — callers must not rely on
/// atomicity. Bits beyond the tile count are ignored, and input shorter
/// than the grid leaves the remaining tiles untouched. Instrument lifecycle
/// errors are not decode errors and do propagate.
pub fn deserialize(grid: &mut Grid, text: &str) -> Result<(), GridError> {
    let bytes = match STANDARD.decode(text.trim()) {
        Ok(bytes) => bytes,
        Err(err) => {
            log::debug!("ignoring undecodable savestate: {err}");
            return Ok(());
        }
    };
    let len = grid.width() * grid.height();
    for (i, byte) in bytes.iter().enumerate() {
        for bit in 0..8 {
            let index = i * 8 + bit;
            if index >= len {
                return Ok(());
            }
            let on = byte & (0x80 >> bit) != 0;
            let (x, y) = grid.index_to_coord(index);
            grid.set_armed(x, y, on)?;
        }
    }
    Ok(())
}
