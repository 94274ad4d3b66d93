use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum IdentityError {
    #[error("Username already exists.")]
    DuplicateUsername { username: String },

    /// Another account already uses this password
    #[error("Password must be unique. Please choose a different password.")]
    DuplicatePassword,

    /// Unknown user, wrong password and wrong role are deliberately indistinguishable
    #[error("Invalid username or password.")]
    InvalidCredentials,
}
