//! Manual instrumentation helpers.

/// Source location of the current line inside `function`.
///
/// ```
/// let site = playback::site!("main");
/// assert_eq!(site.function, "main");
/// ```
#[macro_export]
macro_rules! site {
    ($function:expr) => {
        $crate::Site::new(file!(), line!(), $function)
    };
}

/// Variable bindings for a hook call.
///
/// `locals![x, y]` captures `x` and `y` by clone under their own names;
/// `locals![x, total = a + b]` binds an expression to a name.
#[macro_export]
macro_rules! locals {
    (@pair $name:ident = $value:expr) => {
        (stringify!($name), $crate::Value::from($value))
    };
    (@pair $name:ident) => {
        (stringify!($name), $crate::Value::from($name.clone()))
    };
    () => {{
        let empty: [(&'static str, $crate::Value); 0] = [];
        empty
    }};
    ($($name:ident $(= $value:expr)?),+ $(,)?) => {
        [$($crate::locals!(@pair $name $(= $value)?)),+]
    };
}
