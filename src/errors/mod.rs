pub mod app_error;
pub mod prosody_error;

pub use app_error::{AppError, AppResult};
pub use prosody_error::{ProsodyError, ProsodyResult};
