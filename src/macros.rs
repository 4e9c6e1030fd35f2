/// Build the argument list of a log call from heterogeneous values.
///
/// ```
/// use typed_log_sink::{args, args::Arg};
/// use serde_json::json;
///
/// let list: Vec<Arg> = args!["retrying", 3, json!({"attempt": 3})];
/// assert_eq!(list.len(), 3);
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::args::Arg>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::args::Arg::from($arg)),+]
    };
}
