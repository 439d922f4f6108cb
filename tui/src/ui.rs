mod layout;
mod widgets;

pub use layout::render;
pub use widgets::{
    render_delete_confirmation,
    render_editor,
    render_header,
    render_message,
    render_note_detail,
    render_note_list,
    render_status_bar,
};
