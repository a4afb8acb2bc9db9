pub mod transformer;

pub use transformer::Transformer;
