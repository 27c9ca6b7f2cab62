mod provider;
mod widget;

pub use provider::*;
pub use widget::*;
