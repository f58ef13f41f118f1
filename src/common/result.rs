use crate::common::error::ReleaseError;

/// Result alias used across the crate.
///
/// # Examples
///
/// ```
/// use relmgr::common::result::ReleaseResult;
/// use relmgr::common::error::ReleaseError;
///
/// fn example_function() -> ReleaseResult<String> {
///     Ok("success".to_string())
/// }
///
/// fn example_with_error() -> ReleaseResult<()> {
///     Err(ReleaseError::internal_error("Something went wrong"))
/// }
/// ```
pub type ReleaseResult<T> = Result<T, ReleaseError>;

/// Conversions from `Option` into [`ReleaseResult`].
pub trait OptionExt<T> {
    /// Map `None` to [`ReleaseError::NotPrepared`] for the given operation.
    ///
    /// ```
    /// use relmgr::common::result::{ReleaseResult, OptionExt};
    ///
    /// let missing: Option<u32> = None;
    /// let result: ReleaseResult<u32> = missing.ok_or_not_prepared("commit working copy");
    /// assert!(result.is_err());
    /// ```
    fn ok_or_not_prepared(self, operation: impl Into<String>) -> ReleaseResult<T>;

    /// Map `None` to a [`ReleaseError::ValidationError`].
    ///
    /// ```
    /// use relmgr::common::result::{ReleaseResult, OptionExt};
    ///
    /// let none_value: Option<String> = None;
    /// let result: ReleaseResult<String> = none_value.ok_or_validation_error("field", "required");
    /// assert!(result.is_err());
    /// ```
    fn ok_or_validation_error(
        self,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> ReleaseResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_prepared(self, operation: impl Into<String>) -> ReleaseResult<T> {
        self.ok_or_else(|| ReleaseError::not_prepared(operation))
    }

    fn ok_or_validation_error(
        self,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> ReleaseResult<T> {
        self.ok_or_else(|| ReleaseError::validation_error(field, message, None))
    }
}

/// Conversions from foreign `Result`s into [`ReleaseResult`].
pub trait ResultExt<T, E> {
    /// Wrap an I/O failure with a message and the offending path.
    fn with_filesystem_error(
        self,
        message: impl Into<String>,
        path: Option<std::path::PathBuf>,
    ) -> ReleaseResult<T>
    where
        E: Into<std::io::Error>;
}

impl<T, E> ResultExt<T, E> for Result<T, E> {
    fn with_filesystem_error(
        self,
        message: impl Into<String>,
        path: Option<std::path::PathBuf>,
    ) -> ReleaseResult<T>
    where
        E: Into<std::io::Error>,
    {
        self.map_err(|e| ReleaseError::filesystem_error_with_source(message, path, e.into()))
    }
}
