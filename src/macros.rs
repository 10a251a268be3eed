//! macros used by themekit

/// defer execution of code until current scope exits
///
/// # Examples
///
/// ```
/// use std::cell::RefCell;
/// use themekit::defer;
///
/// let executed = RefCell::new(false);
///
/// {
///     defer! {
///         *executed.borrow_mut() = true;
///     }
///
///     assert!(!*executed.borrow());
/// }
///
/// assert!(*executed.borrow());
/// ```
#[macro_export]
macro_rules! defer {
    ($($body:tt)*) => {
        let _defer_guard = $crate::utils::DeferGuard::new(|| { $($body)* });
    };
}

/// log a "try this instead" hint for a command that was run without a usable theme name
#[macro_export]
macro_rules! usage_hint {
    ($cmd:expr) => {{
        use ::owo_colors::OwoColorize;
        ::tracing::warn!(
            "Try {}",
            format!("themekit {} --name theme_name", $cmd).blue()
        );
    }};

    ($cmd:expr, $reason:expr) => {{
        use ::owo_colors::OwoColorize;
        ::tracing::warn!(
            "{}. Try {}",
            $reason,
            format!("themekit {} --name theme_name", $cmd).blue()
        );
    }};
}

/// helper macro for generating validators
#[macro_export]
macro_rules! validator {
    ($struct_name:ty, $( $field:ident => $requirement:expr, $err_msg:expr );* $(;)? ) => {
        impl Validate for $struct_name {
            fn validate(&self) -> Result<(), Vec<String>> {
                let mut errors: Vec<String> = Vec::new();

                $(
                    if !($requirement)(&self.$field) {
                        errors.push(format!("{}: {}", stringify!($field), $err_msg));
                    }
                )*

                if errors.is_empty() {
                    Ok(())
                } else {
                    Err(errors)
                }
            }
        }
    };
}

/// helper macro for validating a struct made of validated sections
#[macro_export]
macro_rules! validator_nested {
    ($struct_name:ty, nested: { $( $nested:ident );* $(;)? }) => {
        impl Validate for $struct_name {
            fn validate(&self) -> Result<(), Vec<String>> {
                let mut errors: Vec<String> = Vec::new();

                $(
                    if let Err(nested_errors) = self.$nested.validate() {
                        for err in nested_errors {
                            errors.push(format!("{}.{}", stringify!($nested), err));
                        }
                    }
                )*

                if errors.is_empty() {
                    Ok(())
                } else {
                    Err(errors)
                }
            }
        }
    };
}
