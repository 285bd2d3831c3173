// Front end: terminal file picker and user-facing output.

pub mod dialog;
pub mod picker;
