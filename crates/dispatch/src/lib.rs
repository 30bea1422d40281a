pub mod pipeline;
pub mod render;
