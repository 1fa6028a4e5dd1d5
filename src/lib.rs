pub mod aggregate;
pub mod blame;
pub mod cli;
pub mod error;
pub mod git;
pub mod model;
pub mod pie;
pub mod store;
