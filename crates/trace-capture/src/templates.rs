pub mod line;
pub mod meander;
pub mod spiral;
pub mod text;
