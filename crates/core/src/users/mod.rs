//! Users module - accounts, roles and the per-request context.

mod users_model;
mod users_service;
mod users_traits;

pub use users_model::{NewUser, Permissions, RequestContext, Role, User};
pub use users_service::UserService;
pub use users_traits::{UserRepositoryTrait, UserServiceTrait};
