//! Authentication
//!
//! The backend delegates login to an external identity provider and only
//! ever sees a bearer token. This module holds that token explicitly: a
//! [`Session`] is created by the caller and handed to the client builder.

mod session;
mod token;

pub use session::Session;
pub use token::AccessToken;
pub use token::StaticTokenProvider;
pub use token::TokenProvider;
