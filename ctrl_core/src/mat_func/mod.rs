//! # Matrix function module
//!
//! Matrix exponential and real-exponent matrix power, used for discretising
//! continuous dynamics.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod exp;
mod pow;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

pub use exp::*;
pub use pow::*;
