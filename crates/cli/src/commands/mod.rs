pub mod chat;
pub mod domains;
