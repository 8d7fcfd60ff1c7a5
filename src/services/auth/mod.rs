pub mod token_verifier;

pub use token_verifier::{TokenPayload, TokenVerifier, VerificationError, VerifyToken};
