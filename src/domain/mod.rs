pub mod booking;
pub mod catalog;
pub mod content;
pub mod employee;
pub mod lead;
pub mod lifecycle;
pub mod package;

pub use booking::*;
pub use catalog::*;
pub use content::*;
pub use employee::*;
pub use lead::*;
pub use lifecycle::*;
pub use package::*;
