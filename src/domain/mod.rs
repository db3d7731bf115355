// Domain layer - Pure data and invariants, no I/O
pub mod address;
pub mod error;
pub mod map;
pub mod reading;
pub mod route;
pub mod sensor;
