pub mod claims;
pub mod errors;
pub mod handler;

pub use claims::Claims;
pub use claims::EMAIL_CLAIM;
pub use claims::REFRESH_TOKEN_ID_CLAIM;
pub use errors::JwtError;
pub use handler::JwtHandler;
