//! 指し手生成
//!
//! - `pseudo`: 駒の動きだけに従った候補（自玉の安全は見ない）
//! - `drop`: 駒打ち（二歩・行き所のない升・自玉への王手を除く）
//! - `legal`: 仮想実行で自玉に王手が残る手を除いた合法手

mod drop;
mod legal;
mod moves;
mod pseudo;

pub use drop::generate_drop_moves;
pub use legal::{generate_legal_moves, has_any_legal_response, legal_candidates};
pub use moves::{BoardMove, Candidate, CaptureList, DropMove, Promotion};
pub use pseudo::generate_pseudo_moves;
