//! Editing session state.

mod session;
mod view;

pub use session::EditorSession;
pub use view::ViewTransform;
