//! The 12-pattern catalogue of §4.E, compiled into the code as the model's identity.
//!
//! Five overlapping 3x3 squares (four corners plus the centre), four more 3x3 "bands"
//! sliding between them, a T-shaped pattern, and two diagonal bands. All patterns are
//! computed at compile time the way the teacher's `r2048`-adjacent weight matrices in
//! the reference corpus build their rotations with `const fn`.

use crate::core::consts::WIDTH;

pub const NUM_PATTERNS: usize = 12;
pub const PATTERN_SIZE: usize = 9;

const fn square(anchor_x: usize, anchor_y: usize) -> [usize; PATTERN_SIZE] {
    let mut out = [0usize; PATTERN_SIZE];
    let mut dy = 0;
    let mut k = 0;
    while dy < 3 {
        let mut dx = 0;
        while dx < 3 {
            out[k] = (anchor_y + dy) * WIDTH + (anchor_x + dx);
            k += 1;
            dx += 1;
        }
        dy += 1;
    }
    out
}

/// Top bar across the whole board plus a stem down the middle column.
const T_SHAPE: [usize; PATTERN_SIZE] = [0, 1, 2, 3, 4, 7, 12, 17, 22];

/// The main diagonal plus its nearest superdiagonal.
const DIAGONAL_BAND: [usize; PATTERN_SIZE] = [0, 1, 6, 7, 12, 13, 18, 19, 24];

/// The anti-diagonal plus its nearest neighbour.
const ANTI_DIAGONAL_BAND: [usize; PATTERN_SIZE] = [3, 4, 7, 8, 11, 12, 15, 16, 20];

pub const PATTERNS: [[usize; PATTERN_SIZE]; NUM_PATTERNS] = [
    square(0, 0),
    square(2, 0),
    square(0, 2),
    square(2, 2),
    square(1, 1),
    square(1, 0),
    square(0, 1),
    square(2, 1),
    square(1, 2),
    T_SHAPE,
    DIAGONAL_BAND,
    ANTI_DIAGONAL_BAND,
];
