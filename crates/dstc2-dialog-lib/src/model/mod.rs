//! Record types for raw corpus turns and their normalized form.

pub mod normalized_turn;
pub mod raw_turn;
