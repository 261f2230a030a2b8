//! Display models for contract-owned entities.
//!
//! Everything here mirrors what the contract returns. Fields are loosely
//! typed on the wire, so numeric and flag fields go through the coercions in
//! [`lenient`] rather than failing the whole decode.

mod account;
mod appointment;
mod doctor;
pub mod lenient;
mod medicine;
mod patient;
mod record;

pub use account::*;
pub use appointment::*;
pub use doctor::*;
pub use medicine::*;
pub use patient::*;
pub use record::*;
