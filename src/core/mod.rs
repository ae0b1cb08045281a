pub mod dialog;
pub mod services;
pub mod sessions;
pub mod traits;
