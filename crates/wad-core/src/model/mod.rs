pub mod contract;
pub mod definition;
pub mod representation;

pub use contract::*;
pub use definition::*;
pub use representation::*;
