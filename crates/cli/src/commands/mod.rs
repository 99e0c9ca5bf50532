pub mod sweep;

pub use sweep::SweepArgs;
