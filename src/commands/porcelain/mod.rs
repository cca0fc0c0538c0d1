pub mod commit;
pub mod delete;
pub mod init;
pub mod synchronize;
