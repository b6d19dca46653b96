pub mod error;
pub mod event;
pub mod machine;
pub mod model;

pub use error::{StateError, StateResult};
pub use event::{StateTransition, ToggleEvent};
pub use machine::ToggleMachine;
pub use model::{TogglePhase, ToggleState};
