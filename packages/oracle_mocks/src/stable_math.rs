//! Solidly style stable invariant `x^3 * y + y^3 * x = k` over reserves scaled to 18 decimals.

use cosmwasm_std::Uint256;

const ITERATIONS: u8 = 255;

fn one() -> Uint256 {
    Uint256::from(10u128.pow(18))
}

fn f(x0: Uint256, y: Uint256) -> Uint256 {
    let one = one();
    x0 * (y * y / one * y / one) / one + (x0 * x0 / one * x0 / one) * y / one
}

fn d(x0: Uint256, y: Uint256) -> Uint256 {
    let one = one();
    Uint256::from(3u8) * x0 * (y * y / one) / one + (x0 * x0 / one * x0 / one)
}

/// Pool invariant for scaled reserves.
pub(crate) fn invariant(x: Uint256, y: Uint256) -> Uint256 {
    let one = one();
    let a = x * y / one;
    let b = x * x / one + y * y / one;
    a * b / one
}

/// Finds the reserve `y` which keeps the invariant `xy` once the other reserve becomes `x0`.
pub(crate) fn get_y(x0: Uint256, xy: Uint256, mut y: Uint256) -> Uint256 {
    let one = one();
    for _ in 0..ITERATIONS {
        let y_prev = y;
        let k = f(x0, y);
        if k < xy {
            y += (xy - k) * one / d(x0, y);
        } else {
            y -= (k - xy) * one / d(x0, y);
        }
        let dy = if y > y_prev { y - y_prev } else { y_prev - y };
        if dy <= Uint256::one() {
            return y;
        }
    }
    y
}
