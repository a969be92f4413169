//! Derived representations for interop with ROS and OpenCV.
//!
//! None of these are used when persisting streams.

use crate::domain::{Codec, Domain, Encoding};

/// Encoding name understood by ROS `cv_bridge`.
pub fn ros_encoding(encoding: Encoding) -> &'static str {
    match encoding {
        Encoding::Passthrough => "passthrough",
        Encoding::Bgr => "bgr8",
        Encoding::Rgb => "rgb8",
        Encoding::Bgra => "bgra8",
        Encoding::Rgba => "rgba8",
        Encoding::Grey => "mono8",
        Encoding::Grey16 => "mono16",
    }
}

/// Human readable codec name.
pub fn codec_label(codec: Codec) -> &'static str {
    match codec {
        Codec::Mjpeg => "Motion-JPEG",
        Codec::Yuyv => "YUYV 4:2:2",
        Codec::Xvid => "XVID/MP4",
        Codec::Unknown => "unknown",
    }
}

/// FourCC text for an OpenCV `VideoWriter`. `Codec::Unknown` has none.
pub fn fourcc(codec: Codec) -> Option<&'static str> {
    match codec {
        Codec::Mjpeg => Some("MJPG"),
        Codec::Yuyv => Some("YUYV"),
        Codec::Xvid => Some("XVID"),
        Codec::Unknown => None,
    }
}

/// FourCC packed little-endian, matching `cv::VideoWriter::fourcc`.
pub fn fourcc_code(codec: Codec) -> Option<u32> {
    let text = fourcc(codec)?;
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(text.as_bytes());
    Some(u32::from_le_bytes(bytes))
}

impl Codec {
    /// Reverse lookup from either a FourCC (`MJPG`) or a value string (`MJPEG`).
    pub fn from_fourcc(text: &str) -> Option<Codec> {
        [Codec::Mjpeg, Codec::Yuyv, Codec::Xvid]
            .into_iter()
            .find(|codec| fourcc(*codec) == Some(text) || codec.as_str() == text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ros_encoding_is_one_to_one() {
        let mut seen: Vec<&str> = Encoding::ALL.iter().map(|e| ros_encoding(*e)).collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), Encoding::ALL.len());
        assert_eq!(ros_encoding(Encoding::Bgra), "bgra8");
        assert_eq!(ros_encoding(Encoding::Grey16), "mono16");
    }

    #[test]
    fn test_codec_text() {
        assert_eq!(codec_label(Codec::Mjpeg), "Motion-JPEG");
        assert_eq!(codec_label(Codec::Xvid), "XVID/MP4");
        assert_eq!(fourcc(Codec::Mjpeg), Some("MJPG"));
        assert_eq!(fourcc(Codec::Unknown), None);
    }

    #[test]
    fn test_fourcc_code_matches_opencv_packing() {
        // cv::VideoWriter::fourcc('M','J','P','G')
        assert_eq!(fourcc_code(Codec::Mjpeg), Some(0x4750_4A4D));
        assert_eq!(fourcc_code(Codec::Unknown), None);
    }

    #[test]
    fn test_from_fourcc() {
        assert_eq!(Codec::from_fourcc("MJPG"), Some(Codec::Mjpeg));
        assert_eq!(Codec::from_fourcc("MJPEG"), Some(Codec::Mjpeg));
        assert_eq!(Codec::from_fourcc("YUYV"), Some(Codec::Yuyv));
        assert_eq!(Codec::from_fourcc("H264"), None);
    }
}
