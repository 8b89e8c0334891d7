mod actor;
mod movie;

pub use actor::Actor;
pub use movie::Movie;
