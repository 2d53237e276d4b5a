pub mod ephemeris;
pub mod error;
pub mod geometry;
pub mod gradient;
pub mod loader;
pub mod magnetopause;
pub mod render;
pub mod spectral;
pub mod timeseries;
