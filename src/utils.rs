//! # Utility Functions Module
//!
//! Small helpers shared by the configuration and transfer code.

use std::time::Duration;

/// Converts any iterable of string-like items to `Vec<String>`.
///
/// Used to build command line argument lists without repeating
/// `.to_string()` on every literal.
///
/// # Example
/// ```rust
/// use lamanager::utils::to_string_vec;
///
/// let args = to_string_vec(["-avz", "--progress"]);
/// assert_eq!(args, vec!["-avz".to_string(), "--progress".to_string()]);
/// ```
pub fn to_string_vec<T, I>(items: I) -> Vec<String>
where
    T: ToString,
    I: IntoIterator<Item = T>,
{
    items.into_iter().map(|item| item.to_string()).collect()
}

/// Build a `Vec<String>` of command arguments.
///
/// # Example
/// ```rust
/// use lamanager::args;
///
/// let args = args!["-avz", "--progress"];
/// assert_eq!(args.len(), 2);
/// ```
#[macro_export]
macro_rules! args {
    [$($item:expr),* $(,)?] => {
        $crate::utils::to_string_vec([$($item),*])
    };
}

/// Format an elapsed duration as `1h 02m 03s`, `2m 05s` or `4.2s`
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    if secs >= 3600 {
        format!("{}h {:02}m {:02}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    } else if secs >= 60 {
        format!("{}m {:02}s", secs / 60, secs % 60)
    } else {
        format!("{:.1}s", elapsed.as_secs_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_string_vec_empty() {
        let result: Vec<String> = to_string_vec(Vec::<&str>::new());
        assert!(result.is_empty());
    }

    #[test]
    fn test_args_macro_trailing_comma() {
        let level = 3.to_string();
        let result = args!["--progress", &level, "-avz",];
        assert_eq!(result, vec!["--progress".to_string(), "3".to_string(), "-avz".to_string()]);
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::from_millis(4200)), "4.2s");
        assert_eq!(format_elapsed(Duration::from_secs(125)), "2m 05s");
        assert_eq!(format_elapsed(Duration::from_secs(3723)), "1h 02m 03s");
    }
}
