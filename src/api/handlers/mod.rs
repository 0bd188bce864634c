pub mod bookings;
pub mod catalog;
pub mod content;
pub mod employees;
pub mod leads;
pub mod packages;
pub mod payments;
pub mod reports;
pub mod root;
