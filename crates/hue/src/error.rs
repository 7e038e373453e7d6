use thiserror::Error;

#[derive(Error, Debug)]
pub enum HueError {
    /* mapped errors */
    #[error(transparent)]
    ParseIntError(#[from] std::num::ParseIntError),

    #[error(transparent)]
    ParseFloatError(#[from] std::num::ParseFloatError),

    /* hue errors */
    #[error("Percentage out of range: {0}")]
    PercentOutOfRange(i64),

    #[error("Invalid color value: {0:?}")]
    InvalidColor(String),
}

pub type HueResult<T> = Result<T, HueError>;
