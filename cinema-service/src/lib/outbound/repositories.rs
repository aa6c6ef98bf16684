pub mod movie;
pub mod user;

pub use movie::PostgresMovieRepository;
pub use user::PostgresUserRepository;
