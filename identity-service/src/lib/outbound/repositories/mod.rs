pub mod in_memory;
pub mod refresh_token_ids;
pub mod user;

pub use in_memory::InMemoryRefreshTokenIdStore;
pub use refresh_token_ids::PostgresRefreshTokenIdStore;
pub use user::PostgresUserRepository;
