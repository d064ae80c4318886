//! Application layer: use cases and token service

pub mod change_password;
pub mod config;
pub mod deactivate;
pub mod login;
pub mod refresh;
pub mod register;
pub mod token;

pub use change_password::{ChangePasswordInput, ChangePasswordUseCase};
pub use deactivate::DeactivateUseCase;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use refresh::{RefreshOutput, RefreshUseCase};
pub use register::{RegisterInput, RegisterUseCase};
pub use token::{Claims, TokenService};
