pub mod achievement;
pub mod journey;
pub mod transport;
pub mod user;
