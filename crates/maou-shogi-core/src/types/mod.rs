//! 基本型

mod color;
mod hand;
mod piece;
mod piece_type;
mod square;

pub use color::Color;
pub use hand::Hand;
pub use piece::Piece;
pub use piece_type::{PieceForm, PieceType};
pub use square::{BOARD_SIZE, Coord, OutOfBoard, Square};
