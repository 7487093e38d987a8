pub mod cover;
pub mod init;
pub mod inspect;
pub mod session;
