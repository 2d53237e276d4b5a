pub mod gradient_chart;
pub mod orbit_planes;
pub mod orbit_scene;
pub mod psd_chart;
