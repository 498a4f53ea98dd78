/// Compile a regex literal once and return a `&'static Regex`.
#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: $crate::__private::Lazy<$crate::__private::Regex> =
            $crate::__private::Lazy::new(|| $crate::__private::Regex::new($pat).unwrap());
        &*RE
    }};
}

/// A regex literal as a raw [`Spec`](crate::Spec), compiled once.
#[macro_export]
macro_rules! re {
    ($pat:literal) => {
        $crate::Spec::Regex($crate::regex!($pat).clone())
    };
}

/// Wrap a predicate function, naming it after its path.
#[macro_export]
macro_rules! pred {
    ($p:path) => {
        $crate::matchers::pred(stringify!($p), $p)
    };
}
