pub mod pair;
pub mod score;
