use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlotError {
    #[error("Plotting precondition failed: {what}")]
    PlottingPrecondition { what: String },

    #[error("Dimension error: {message}")]
    Dimension { message: String },

    #[error("Render error: {message}")]
    Render { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type PlotResult<T> = Result<T, PlotError>;

pub(crate) fn precondition(what: impl Into<String>) -> PlotError {
    PlotError::PlottingPrecondition { what: what.into() }
}

pub(crate) fn dimension(message: impl Into<String>) -> PlotError {
    PlotError::Dimension {
        message: message.into(),
    }
}
