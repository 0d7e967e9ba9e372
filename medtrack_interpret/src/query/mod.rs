//! History questions answered from the record store.

pub mod answerer;
