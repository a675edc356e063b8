pub mod render_sink;
pub mod status_border;
