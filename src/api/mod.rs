pub mod render;
pub mod sessions;
pub mod styles;

pub use render::{__path_handle_export, __path_handle_render, __path_handle_toggle};
pub use render::{handle_export, handle_render, handle_toggle, RenderRequest, SHOW_ORIGINAL_HEADER};
pub use sessions::{
    __path_handle_create_session, __path_handle_delete_session, __path_handle_get_session,
};
pub use sessions::{handle_create_session, handle_delete_session, handle_get_session};
pub use styles::{handle_styles, StylesResponse, __path_handle_styles};
