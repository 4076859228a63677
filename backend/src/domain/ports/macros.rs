//! Helper macro for declaring store port error enums with snake-case
//! constructors.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Constructor generation for store error enums.
    define_port_error! {
        pub enum ProbeStoreError {
            Offline { message: String } => "probe store offline: {message}",
            Missing { attempts: u32 } => "probe missing after {attempts} attempts",
            Conflict { key: String, attempts: u32 } => "conflict on {key} ({attempts})",
            Closed => "probe store closed",
        }
    }

    #[test]
    fn string_fields_accept_str() {
        let err = ProbeStoreError::offline("socket reset");
        assert_eq!(err.to_string(), "probe store offline: socket reset");
    }

    #[test]
    fn non_string_fields_keep_their_type() {
        let err = ProbeStoreError::missing(3_u32);
        assert_eq!(err.to_string(), "probe missing after 3 attempts");
    }

    #[test]
    fn mixed_fields_are_supported() {
        let err = ProbeStoreError::conflict("pr-1", 2_u32);
        assert_eq!(err.to_string(), "conflict on pr-1 (2)");
    }

    #[test]
    fn unit_variants_get_nullary_constructors() {
        assert_eq!(ProbeStoreError::closed(), ProbeStoreError::Closed);
    }
}
