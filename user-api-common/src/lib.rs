//! User API Common Types
//!
//! Wire types shared by the backend and any client talking to it.

pub mod response;
pub mod user;

pub use response::{MessageResponse, StatusResponse, ValidationErrorResponse};
pub use user::UserResource;
