pub mod batch;
pub mod init;
pub mod issue;
pub mod list;
pub mod session;
pub mod verify;
