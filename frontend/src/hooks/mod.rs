pub mod use_availability;

pub use use_availability::use_availability;
