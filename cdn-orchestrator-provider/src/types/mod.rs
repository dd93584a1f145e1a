//! 统一数据模型

mod action;
mod config;
mod enums;
mod provider;
mod request;

pub use action::UpdateAction;
pub use config::*;
pub use enums::*;
pub use provider::*;
pub use request::*;
