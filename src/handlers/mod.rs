mod actors;
mod health;
mod movies;

pub use actors::{create_actor, delete_actor, list_actors, update_actor};
pub use health::health;
pub use movies::{create_movie, delete_movie, list_movies, search_movies, update_movie};
