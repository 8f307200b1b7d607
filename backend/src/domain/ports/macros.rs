//! Helper macro for driven-port error enums.
//!
//! Every port error is a `thiserror` enum whose variants carry named fields.
//! The macro also emits a snake-case constructor per variant that accepts
//! anything convertible into the field types, so adapters can write
//! `KeyValueStoreError::backend(err.to_string())`.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $($field:ident : $ty:ty),+ $(,)? } => $message:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $($field : $ty),+ },
            )+
        }

        ::paste::paste! {
            impl $name {
                $(
                    #[doc = concat!("Construct [`", stringify!($name), "::", stringify!($variant), "`].")]
                    pub fn [<$variant:snake>]($($field: impl Into<$ty>),+) -> Self {
                        Self::$variant { $($field: $field.into()),+ }
                    }
                )+
            }
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum SamplePortError {
            Offline { message: String } => "offline: {message}",
            Rejected { status: u16, reason: String } => "rejected ({status}): {reason}",
        }
    }

    #[test]
    fn constructors_convert_string_fields() {
        let err = SamplePortError::offline("socket closed");
        assert_eq!(err.to_string(), "offline: socket closed");
    }

    #[test]
    fn constructors_accept_mixed_field_types() {
        let err = SamplePortError::rejected(422_u16, "missing city");
        assert_eq!(err.to_string(), "rejected (422): missing city");
        assert_eq!(
            err,
            SamplePortError::Rejected {
                status: 422,
                reason: "missing city".to_owned()
            }
        );
    }
}
