pub mod canonical;
pub mod model;
