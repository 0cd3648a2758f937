pub mod queue;
pub mod text;
