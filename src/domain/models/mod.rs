mod action;
mod backend;
mod bmi;
mod message;
mod prompt;
mod session;
mod slash_commands;
mod workout;

pub use action::*;
pub use backend::*;
pub use bmi::*;
pub use message::*;
pub use prompt::*;
pub use session::*;
pub use slash_commands::*;
pub use workout::*;
