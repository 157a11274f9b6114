//! Loose scalar casts over reflected values.
//!
//! Every cast takes a `&dyn Reflect` and looks through `Option`, `Box` and
//! `Dynamic` layers first; an empty layer reads as the zero value of the
//! target.
//!
//! ```
//! use core::time::Duration;
//! use vc_coerce::{CastOptions, TimeUnit};
//!
//! assert_eq!(vc_coerce::to_i64(&"0x1f").unwrap(), 31);
//! assert_eq!(vc_coerce::to_string(&Some(2.5_f32)), "2.5");
//!
//! let seconds = CastOptions::new().with_unit(TimeUnit::Seconds);
//! let timeout: Duration = vc_coerce::to(&90_u32, &seconds).unwrap();
//! assert_eq!(timeout, Duration::from_secs(90));
//! ```

// -----------------------------------------------------------------------------
// Modules

mod duration;
mod error;
mod number;
mod options;
mod scalar;
mod text;
mod time;

// -----------------------------------------------------------------------------
// Exports

pub use duration::to_duration;
pub use error::CastError;
pub use number::{
    to_bool, to_f32, to_f64, to_i8, to_i16, to_i32, to_i64, to_isize, to_u8, to_u16, to_u32,
    to_u64, to_usize,
};
pub use options::{CastOptions, TimeUnit};
pub use text::to_string;
pub use time::to_time;

use core::any::Any;
use core::time::Duration;
use std::time::SystemTime;

use vc_reflect::Reflect;

// -----------------------------------------------------------------------------
// Dispatch

macro_rules! cast_targets {
    ($slot:ident => $($ty:ty => $cast:expr,)*) => {$(
        if let Some(slot) = $slot.downcast_mut::<$ty>() {
            *slot = $cast?;
            return Ok(());
        }
    )*};
}

/// Casts `value` into `dest`, picking the cast by the type of `dest`.
///
/// `bool`, the integer and float types, `String`, `Duration` and `SystemTime`
/// go through the matching `to_*` function. Any other type is filled by
/// [`vc_transcode::convert`], which only moves values of identical types.
pub fn cast_into<T: Reflect>(
    value: &dyn Reflect,
    dest: &mut T,
    options: &CastOptions,
) -> Result<(), CastError> {
    let slot: &mut dyn Any = &mut *dest;
    cast_targets! { slot =>
        bool => to_bool(value),
        i8 => to_i8(value),
        i16 => to_i16(value),
        i32 => to_i32(value),
        i64 => to_i64(value),
        isize => to_isize(value),
        u8 => to_u8(value),
        u16 => to_u16(value),
        u32 => to_u32(value),
        u64 => to_u64(value),
        usize => to_usize(value),
        f32 => to_f32(value),
        f64 => to_f64(value),
        String => Ok::<_, CastError>(to_string(value)),
        Duration => to_duration(value, options),
        SystemTime => to_time(value, options),
    }

    log::trace!("no scalar cast into `{}`, transcoding", dest.reflect_type_path());
    vc_transcode::convert(value, dest)?;
    Ok(())
}

/// Casts `value` into a fresh `T`.
///
/// See [`cast_into`]. `SystemTime` has no default value; use [`to_time`].
pub fn to<T: Reflect + Default>(value: &dyn Reflect, options: &CastOptions) -> Result<T, CastError> {
    let mut out = T::default();
    cast_into(value, &mut out, options)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use core::time::Duration;
    use std::time::{SystemTime, UNIX_EPOCH};

    use vc_reflect::Reflect;
    use vc_reflect::ops::Dynamic;

    use crate::{CastError, CastOptions, TimeUnit, cast_into, to};

    #[derive(Reflect, Default)]
    struct Person {
        pub name: String,
        pub age: u32,
    }

    #[derive(Reflect, Default, Debug, PartialEq)]
    struct Resident {
        pub name: String,
        pub city: String,
    }

    #[test]
    fn scalars_dispatch_by_type() {
        let options = CastOptions::new();
        assert_eq!(to::<u8>(&"12", &options).unwrap(), 12);
        assert_eq!(to::<i32>(&Some(-3_i64), &options).unwrap(), -3);
        assert!(to::<bool>(&"T", &options).unwrap());
        assert_eq!(to::<f32>(&"0.25", &options).unwrap(), 0.25);
        assert_eq!(to::<String>(&7_usize, &options).unwrap(), "7");
        assert_eq!(
            to::<Duration>(&"1.5s", &options).unwrap(),
            Duration::from_millis(1500)
        );
        assert!(matches!(
            to::<u16>(&70_000_u32, &options),
            Err(CastError::Overflow { .. })
        ));
    }

    #[test]
    fn times_are_cast_in_place() {
        let mut time = SystemTime::now();
        let millis = CastOptions::new().with_unit(TimeUnit::Milliseconds);
        cast_into(&Dynamic::new(2_000_i64), &mut time, &millis).unwrap();
        assert_eq!(time, UNIX_EPOCH + Duration::from_secs(2));
    }

    #[test]
    fn other_types_are_transcoded() {
        let person = Person {
            name: "Ada".into(),
            age: 36,
        };
        let resident: Resident = to(&person, &CastOptions::new()).unwrap();
        assert_eq!(
            resident,
            Resident {
                name: "Ada".into(),
                city: String::new(),
            }
        );

        let list: Vec<u8> = to(&[1_u8, 2, 3], &CastOptions::new()).unwrap();
        assert_eq!(list, [1, 2, 3]);

        let mut untouched = vec![9_u8];
        cast_into(&None::<Vec<u8>>, &mut untouched, &CastOptions::new()).unwrap();
        assert_eq!(untouched, [9]);
    }
}
