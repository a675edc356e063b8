use crate::display::domain::render_sink::RenderSink;

/// Opens the display window for this build.
pub fn open_window(name: &str) -> Result<Box<dyn RenderSink>, Box<dyn std::error::Error>> {
    #[cfg(feature = "opencv")]
    {
        use super::highgui_window::HighguiWindow;
        Ok(Box::new(HighguiWindow::open(name)?))
    }
    #[cfg(not(feature = "opencv"))]
    {
        Err(format!("cannot open window {name:?}: display requires `--features opencv`").into())
    }
}
