pub mod ray;

pub use ray::{Projection, Ray};
