//! Text interchange formats: the `C.D.H.S` hand shorthand, the compact board
//! identifier, and PBN for external double-dummy tools.

pub mod hand_parser;
pub mod identifier;
pub mod pbn;
