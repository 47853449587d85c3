// Intranet security core
//
// HTTP- and storage-agnostic building blocks of the intranet backend's
// security layer:
// - RouteClassifier decides which paths are public
// - CorsPolicyProvider hands out the fixed cross-origin policy
// - AccountAuthProvider verifies credentials with a PasswordEncoder (bcrypt)
// - AccountStore / SessionStore are the persistence seams
//
// The axum wiring lives in intranet-server.

pub mod account;
pub mod auth;
pub mod classifier;
pub mod cors;
pub mod error;
pub mod metadata;
pub mod password;
pub mod paths;
pub mod session;
pub mod traits;

pub use account::{Account, AccountId, Credentials, NewAccount, Principal};
pub use auth::{AccountAuthProvider, AuthenticationProvider};
pub use classifier::RouteClassifier;
pub use cors::{CorsPolicy, CorsPolicyProvider, OriginPattern};
pub use error::{Error, Result};
pub use metadata::{LengthRule, Metadata};
pub use password::{BcryptPasswordEncoder, PasswordEncoder};
pub use session::Session;
pub use traits::{AccountStore, SessionStore};
