use failure::Error as FailureError;

/// Failures while reading the source extracts. All of them abort startup.
#[derive(Debug, Fail)]
pub enum LoadError {
    #[fail(display = "Source file {} could not be opened", path)]
    Open { path: String },
    #[fail(display = "Malformed {} table", table)]
    Parse { table: &'static str },
    #[fail(display = "Unparseable timestamp {:?} in column {}", value, column)]
    Timestamp { column: &'static str, value: String },
    #[fail(display = "Missing value in column {} of {} table", column, table)]
    MissingValue { table: &'static str, column: &'static str },
    #[fail(display = "Logo asset {} could not be read", path)]
    Logo { path: String },
}

#[derive(Debug, Fail)]
pub enum ControllerError {
    #[fail(display = "Not found")]
    NotFound,
    #[fail(display = "Method not allowed")]
    MethodNotAllowed,
    #[fail(display = "Bad request: {}", _0)]
    BadRequest(FailureError),
    #[fail(display = "Internal server error: {}", _0)]
    InternalServerError(FailureError),
}

impl From<FailureError> for ControllerError {
    fn from(e: FailureError) -> Self {
        ControllerError::InternalServerError(e)
    }
}
