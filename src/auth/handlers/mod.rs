/**
 * Auth Handlers
 *
 * HTTP surface under /api/auth. Login, signup, and Google login all set
 * the `loginToken` cookie on success; logout clears it. All four routes
 * are public.
 */

pub mod google;
pub mod login;
pub mod logout;
pub mod signup;
pub mod types;

pub use google::login_with_google;
pub use login::login;
pub use logout::logout;
pub use signup::signup;
