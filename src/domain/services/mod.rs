mod bmi;
mod chat;
mod generation;
mod sessions;
mod workout;

pub use bmi::*;
pub use chat::*;
pub use generation::*;
pub use sessions::*;
pub use workout::*;
