use crate::error::BezierError;

/*
Odd-Symmetric Tables
====================

The resampled curve is a single positive hump. Mirroring it upside down
about the table's center turns it into one full bipolar cycle:

    index:  0 ........ center ........ len
             ___
            /   \
    ───────/─────\───────────────────────
                  \        ___       /
                   \______/   \_____/   (negated, reversed copy)

    table[center + k] = -table[center - k]     for k in 0..center

At k = 0 the rule pins the center sample to zero, which is where the
cycle crosses from positive to negative. Both halves carry the same area
with opposite sign, so the table has no DC offset.
*/

/// Overwrite the second half of `table` with the negated mirror of the first.
///
/// Allocation-free. Only indices `center..len` are written; `table` must have
/// even length. Use [`assemble`] for a checked version.
pub(crate) fn mirror_in_place(table: &mut [f32]) {
    let center = table.len() / 2;
    if center == 0 {
        return;
    }

    table[center] = 0.0;
    for k in 1..center {
        table[center + k] = -table[center - k];
    }
}

/// Build a full table from a half table of `full.len() / 2` samples.
pub fn assemble(half: &[f32], full: &mut [f32]) -> Result<(), BezierError> {
    if full.len() % 2 != 0 || full.len() / 2 != half.len() {
        return Err(BezierError::BufferSize {
            expected: half.len() * 2,
            actual: full.len(),
        });
    }

    full[..half.len()].copy_from_slice(half);
    mirror_in_place(full);
    Ok(())
}
