//! Pure Dutch-auction price curves.
//!
//! ## Exponential half-life decay
//!
//! The premium above `base_price` halves every `half_life` seconds. Within a
//! half-life window the premium decays linearly from the window's start value
//! to half that value, so the curve is continuous and non-increasing rather
//! than stepping at window boundaries:
//!
//! ```text
//! premium(t) = ((start - base) >> n) * (1 - rem / (2 * half_life))
//!   where n = elapsed / half_life, rem = elapsed % half_life
//! price(t)   = base + premium(t)
//! ```
//!
//! Exactly one half-life after start the price is `(start + base) / 2`.
//! Integer right-shift drives the premium to zero in finite time, after
//! which the price stays clamped at `base_price` permanently.

use crate::errors::Error;

/// Exponential-decay price at `now`, in the minter's currency.
///
/// Callers guarantee `start_price > base_price` and `half_life > 0`
/// (enforced at configuration time).
pub fn da_exp_price(
    now: u64,
    timestamp_start: u64,
    half_life: u64,
    start_price: i128,
    base_price: i128,
) -> Result<i128, Error> {
    if now < timestamp_start {
        return Err(Error::AuctionNotStarted);
    }
    let elapsed = now - timestamp_start;
    let steps = elapsed / half_life;
    if steps >= 127 {
        return Ok(base_price);
    }
    let mut premium = (start_price - base_price) >> (steps as u32);
    let rem = (elapsed % half_life) as i128;
    premium -= premium * rem / (half_life as i128) / 2;
    Ok(base_price + premium)
}

/// Linear-decay price at `now`: `start_price` at `timestamp_start` falling
/// to `base_price` at `timestamp_end`, clamped at `base_price` afterwards.
///
/// Callers guarantee `start_price > base_price` and
/// `timestamp_start < timestamp_end`.
pub fn da_lin_price(
    now: u64,
    timestamp_start: u64,
    timestamp_end: u64,
    start_price: i128,
    base_price: i128,
) -> Result<i128, Error> {
    if now < timestamp_start {
        return Err(Error::AuctionNotStarted);
    }
    if now >= timestamp_end {
        return Ok(base_price);
    }
    let elapsed = (now - timestamp_start) as i128;
    let duration = (timestamp_end - timestamp_start) as i128;
    Ok(start_price - (start_price - base_price) * elapsed / duration)
}
