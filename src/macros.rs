/// Builds a [`crate::Value`] from literal syntax.
///
/// Tables are written with braces and string-literal keys, arrays with
/// brackets; scalars go through [`From`].
///
/// # Examples
///
/// ```rust
/// use minitoml::toml;
///
/// let value = toml!({
///     "name": "Alice",
///     "port": 8080,
///     "tags": ["a", "b"]
/// });
/// assert!(value.is_table());
/// ```
#[macro_export]
macro_rules! toml {
    // Handle true
    (true) => {
        $crate::Value::Boolean(true)
    };

    // Handle false
    (false) => {
        $crate::Value::Boolean(false)
    };

    // Handle empty array
    ([]) => {
        $crate::Value::Array(vec![])
    };

    // Handle non-empty array
    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Array(vec![$($crate::toml!($elem)),*])
    };

    // Handle empty table
    ({}) => {
        $crate::Value::Table($crate::Table::new())
    };

    // Handle non-empty table
    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut table = $crate::Table::new();
        $(
            table.insert($key.to_string(), $crate::toml!($value));
        )*
        $crate::Value::Table(table)
    }};

    // Fallback: anything convertible via From
    ($other:expr) => {
        $crate::Value::from($other)
    };
}
