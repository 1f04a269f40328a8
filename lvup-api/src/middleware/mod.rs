/// HTTP middleware
///
/// - `security`: OWASP response headers

pub mod security;
