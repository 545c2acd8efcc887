mod component;
mod render;
pub mod state;
mod types;

pub use component::QueryPanel;
