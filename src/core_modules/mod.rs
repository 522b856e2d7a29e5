pub mod collage;
pub mod color;
pub mod filters;
pub mod kernel;
pub mod picture;
pub mod pixel;
pub mod scaling;
pub mod utils;
