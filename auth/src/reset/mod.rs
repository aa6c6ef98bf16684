pub mod token;

pub use token::ResetToken;
pub use token::RESET_TOKEN_BYTES;
pub use token::RESET_TOKEN_TTL_MINUTES;
