//! Data models for qboard

mod module;
mod question;
mod user;

pub use module::Module;
pub use question::{Question, QuestionId};
pub use user::User;
