use failure::Error as FailureError;

pub type ServiceResult<T> = Result<T, FailureError>;
