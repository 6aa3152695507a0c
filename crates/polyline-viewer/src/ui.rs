pub mod canvas;
pub mod framework;
pub mod root;
