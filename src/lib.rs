#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use vc_coerce as coerce;
pub use vc_reflect as reflect;
pub use vc_transcode as transcode;
pub use vc_utils as utils;

pub use vc_coerce::{CastError, CastOptions, TimeUnit, cast_into, to};
pub use vc_reflect::Reflect;
pub use vc_transcode::{TranscodeError, convert};

#[cfg(feature = "json")]
#[cfg_attr(docsrs, doc(cfg(feature = "json")))]
pub use vc_transcode::json;
