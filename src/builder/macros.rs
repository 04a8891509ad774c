//! Macros for declaring closed state and event enumerations.

/// Generate a `State` implementation for a fieldless enum.
///
/// The enum also derives everything the trait requires, so it can be used
/// in builders, JSON configurations and checkpoints directly. Variant names
/// double as state names.
///
/// The expansion derives `serde::Serialize` and `serde::Deserialize`, so the
/// calling crate needs `serde` (with the `derive` feature) as a dependency.
///
/// # Example
///
/// ```
/// use fsm_history::core::State;
/// use fsm_history::state_enum;
///
/// state_enum! {
///     pub enum Light {
///         Green,
///         Yellow,
///         Red,
///     }
/// }
///
/// assert_eq!(Light::Yellow.name(), "Yellow");
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}

/// Generate an `Event` implementation for a fieldless enum.
///
/// Like [`state_enum!`], the calling crate needs `serde` with the `derive`
/// feature.
///
/// # Example
///
/// ```
/// use fsm_history::core::Event;
/// use fsm_history::event_enum;
///
/// event_enum! {
///     pub enum Signal {
///         Next,
///         Halt,
///     }
/// }
///
/// assert_eq!(Signal::Halt.name(), "Halt");
/// ```
#[macro_export]
macro_rules! event_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::Event for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}
