//! Canonical truth-table generation.
//!
//! Every simulator in Helix evaluates one value per truth-table row, where
//! the rows enumerate all combinations of the primary input states. Input 0
//! is the most significant bit: its column is the first half `false`, the
//! second half `true`; each later input alternates twice as fast.

/// Returns the number of truth-table rows for `num_inputs` primary inputs.
pub fn num_rows(num_inputs: usize) -> usize {
    1 << num_inputs
}

/// Returns the logic column for primary input `index` out of `num_inputs`.
///
/// The column consists of `2^index` repeated blocks, each block being
/// `2^(num_inputs - 1 - index)` `false` values followed by the same number
/// of `true` values. This is standard binary counting with input 0 as the
/// most significant bit.
///
/// # Panics
///
/// Panics if `index >= num_inputs`.
pub fn input_column(index: usize, num_inputs: usize) -> Vec<bool> {
    assert!(index < num_inputs, "input index out of range");
    let half_block = 1 << (num_inputs - 1 - index);
    let mut column = Vec::with_capacity(num_rows(num_inputs));
    for _ in 0..(1 << index) {
        column.extend(std::iter::repeat(false).take(half_block));
        column.extend(std::iter::repeat(true).take(half_block));
    }
    column
}
