pub mod cached;
pub mod config;
pub mod history;
pub mod links;
pub mod scan;

pub use cached::*;
pub use config::*;
pub use history::*;
pub use links::*;
pub use scan::*;
