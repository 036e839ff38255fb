use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template rendering failed: {0}")]
    TemplateRender(String),

    #[error("template parse error: {0}")]
    TemplateParse(String),

    #[error("cannot rasterize a {width}x{height} surface")]
    EmptySurface { width: u32, height: u32 },

    #[error("a {width}x{height} surface exceeds the {max}px raster limit")]
    SurfaceTooLarge { width: u32, height: u32, max: u32 },

    #[error("PNG encoding failed: {0}")]
    Png(String),

    #[error("session has not been analyzed")]
    NotAnalyzed,

}

impl From<tera::Error> for RenderError {
    fn from(e: tera::Error) -> Self {
        RenderError::TemplateRender(e.to_string())
    }
}
