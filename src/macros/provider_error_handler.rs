/// unwrap a provider result inside a route.
/// missing data is passed on as is, any other failure is logged under `$target` first.
macro_rules! provider_handle_error {
    ( $data:expr, $target:expr, $type_str:expr ) => {
        match $data {
            Ok(e) => e,
            Err(error @ $crate::errors::Error::NotFoundError { .. }) => {
                return Err(error);
            }
            Err(error) => {
                log::error!(target:$target, "Error getting {}. (error: {})", $type_str, error);
                return Err(error);
            }
        }
    }
}

/// same as `provider_handle_error` but for result tables.
/// a missing or empty table becomes a `NotFoundError` for `$type_str`.
macro_rules! provider_require_table {
    ( $data:expr, $target:expr, $type_str:expr ) => {
        match $data {
            Ok(Some(table)) if !table.is_empty() => table,
            Ok(_) => {
                return Err($crate::errors::Error::not_found($type_str));
            }
            Err(error @ $crate::errors::Error::NotFoundError { .. }) => {
                return Err(error);
            }
            Err(error) => {
                log::error!(target:$target, "Error getting {}. (error: {})", $type_str, error);
                return Err(error);
            }
        }
    }
}

pub(crate) use provider_handle_error;
pub(crate) use provider_require_table;
