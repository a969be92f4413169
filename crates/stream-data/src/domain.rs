//! Closed, string-backed value sets used across the stream schema.
//!
//! The textual form of every member is its value string, so a store never
//! contains opaque indices. Lookups are exact and case sensitive.

use crate::error::SchemaError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// A closed set of symbolic values backed by strings.
pub trait Domain: Copy + Eq + 'static {
    /// Name used in error messages.
    const NAME: &'static str;
    /// Every member, in declaration order.
    const ALL: &'static [Self];

    fn as_str(&self) -> &'static str;
}

/// Resolve `raw` against the value set of `T`.
pub fn resolve<T: Domain>(raw: &str) -> Result<T, SchemaError> {
    T::ALL
        .iter()
        .copied()
        .find(|member| member.as_str() == raw)
        .ok_or_else(|| SchemaError::UnknownVariant {
            domain: T::NAME,
            value: raw.to_string(),
        })
}

/// Value space of a device control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlKind {
    Int,
    Bool,
    Menu,
}

impl Domain for ControlKind {
    const NAME: &'static str = "control kind";
    const ALL: &'static [Self] = &[ControlKind::Int, ControlKind::Bool, ControlKind::Menu];

    fn as_str(&self) -> &'static str {
        match self {
            ControlKind::Int => "int",
            ControlKind::Bool => "bool",
            ControlKind::Menu => "menu",
        }
    }
}

/// Pixel layout of decoded frames.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// No forced conversion.
    #[default]
    Passthrough,
    Bgr,
    Grey,
    Grey16,
    Rgb,
    Bgra,
    Rgba,
}

impl Domain for Encoding {
    const NAME: &'static str = "encoding";
    const ALL: &'static [Self] = &[
        Encoding::Passthrough,
        Encoding::Bgr,
        Encoding::Grey,
        Encoding::Grey16,
        Encoding::Rgb,
        Encoding::Bgra,
        Encoding::Rgba,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Encoding::Passthrough => "passthrough",
            Encoding::Bgr => "bgr",
            Encoding::Grey => "grey",
            Encoding::Grey16 => "grey16",
            Encoding::Rgb => "rgb",
            Encoding::Bgra => "bgra",
            Encoding::Rgba => "rgba",
        }
    }
}

/// Compression / pixel format identity of a stream (FourCC-like).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Codec {
    /// Motion-JPEG
    #[serde(rename = "MJPEG")]
    Mjpeg,
    #[serde(rename = "YUYV")]
    Yuyv,
    /// MP4 files
    #[serde(rename = "XVID")]
    Xvid,
    #[default]
    #[serde(rename = "unknown")]
    Unknown,
}

impl Domain for Codec {
    const NAME: &'static str = "codec";
    const ALL: &'static [Self] = &[Codec::Mjpeg, Codec::Yuyv, Codec::Xvid, Codec::Unknown];

    fn as_str(&self) -> &'static str {
        match self {
            Codec::Mjpeg => "MJPEG",
            Codec::Yuyv => "YUYV",
            Codec::Xvid => "XVID",
            Codec::Unknown => "unknown",
        }
    }
}

macro_rules! string_backed {
    ($($ty:ty),+) => {$(
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = SchemaError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                resolve(s)
            }
        }
    )+};
}

string_backed!(ControlKind, Encoding, Codec);
