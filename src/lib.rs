pub mod minmax;
pub mod position;
mod tests;
