pub mod params;
pub mod submit;
