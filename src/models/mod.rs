mod state;
mod user;

pub use state::AppState;
pub use user::{NewUser, User, UserResponse};
