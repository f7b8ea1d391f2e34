//! Middleware for the web layer.

pub mod auth;

pub use auth::{jwt_auth, JwtClaims, JwtState, OptionalAuthUser};
