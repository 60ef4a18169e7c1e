pub mod entries;
pub mod init;
pub mod misc;
pub mod shell;
pub mod stats;
pub mod transfer;
