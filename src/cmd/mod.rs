pub mod balls;
pub mod score;
