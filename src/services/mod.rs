pub mod dialogue;
pub mod grammar;
pub mod matcher;
pub mod session;
pub mod speech;
