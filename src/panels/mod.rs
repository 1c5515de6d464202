mod central_panel;
mod dialogs;
mod toolbar;
mod tools_panel;
mod transform_panel;

pub use central_panel::central_panel;
pub use dialogs::{status_panel, text_prompt};
pub use toolbar::toolbar;
pub use tools_panel::tools_panel;
pub use transform_panel::transform_panel;
