pub mod converters;
pub mod stats;
