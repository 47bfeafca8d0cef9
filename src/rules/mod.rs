//! Rules-backed game models.

mod chess_model;

pub use chess_model::ChessModel;
