/// Authentication and authorization
///
/// - `jwt`: HS256 access/refresh token creation and validation
/// - `password`: Argon2id hashing and password strength checks
/// - `middleware`: bearer-token middleware and the `AuthContext` it carries
///   through request extensions
/// - `authorization`: role gates and course ownership checks

pub mod authorization;
pub mod jwt;
pub mod middleware;
pub mod password;
