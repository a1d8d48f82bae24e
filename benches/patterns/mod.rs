pub mod shapes;
pub mod wiring;
