//! Skin analysis module
//!
//! Samples three facial regions of a still frame, averages the samples,
//! classifies the result and attaches the recommendation list.

pub mod classify;
pub mod detector;
pub mod error;
pub mod frame;
pub mod landmarks;
pub mod recommend;
pub mod report;
pub mod sample;

pub use classify::{classify, SkinType};
pub use detector::{FaceDetector, SuppliedDetections};
pub use error::AnalysisError;
pub use frame::{BoundsPolicy, Frame};
pub use landmarks::{Detection, FaceBox, Point, Region, RegionMap};
pub use recommend::recommendations;
pub use report::{MetricPercents, RegionReading, SkinReport};
pub use sample::{RegionSample, SkinMetrics};

/// Tunables for one analysis run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalysisSettings {
    pub regions: RegionMap,
    pub bounds: BoundsPolicy,
}

/// Analyse one detected face on `frame`
pub fn analyze_face(
    frame: &Frame,
    detection: &Detection,
    settings: &AnalysisSettings,
) -> Result<SkinReport, AnalysisError> {
    let mut readings = Vec::with_capacity(Region::ALL.len());
    for region in Region::ALL {
        let landmark = settings.regions.index(region);
        let point = detection.landmark(landmark)?;
        let sample = RegionSample::at(frame, point, settings.bounds)?;
        readings.push(RegionReading {
            region,
            landmark,
            point,
            sample,
        });
    }

    let samples = [readings[0].sample, readings[1].sample, readings[2].sample];
    let metrics = SkinMetrics::mean(&samples);
    let skin_type = classify(&metrics);
    Ok(SkinReport::new(skin_type, metrics, readings))
}

/// Detect faces on a still frame and analyse the first one
///
/// Only the first face in detector order is used; the rest are ignored.
pub async fn analyze_still<D: FaceDetector>(
    detector: &D,
    frame: &Frame,
    settings: &AnalysisSettings,
) -> Result<SkinReport, AnalysisError> {
    let faces = detector.detect(frame).await?;
    let first = faces.first().ok_or(AnalysisError::NoFaceDetected)?;
    analyze_face(frame, first, settings)
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::{Detection, FaceBox, Frame, Point, RegionMap};

    /// 68 landmarks all at (0, 0) except the three sampled ones
    pub fn face_at(forehead: Point, cheek: Point, chin: Point) -> Detection {
        let map = RegionMap::default();
        let mut landmarks = vec![Point::new(0.0, 0.0); 68];
        landmarks[map.forehead] = forehead;
        landmarks[map.cheek] = cheek;
        landmarks[map.chin] = chin;
        Detection::new(
            FaceBox {
                x: 0.0,
                y: 0.0,
                width: 10.0,
                height: 10.0,
            },
            landmarks,
        )
    }

    /// 10x10 frame with three coloured pixels at (2,1), (1,5) and (5,8)
    pub fn painted_frame(forehead: [u8; 3], cheek: [u8; 3], chin: [u8; 3]) -> (Frame, Detection) {
        let mut frame = Frame::solid(10, 10, [0, 0, 0]).unwrap();
        frame.put_pixel(2, 1, forehead);
        frame.put_pixel(1, 5, cheek);
        frame.put_pixel(5, 8, chin);
        let face = face_at(
            Point::new(2.0, 1.0),
            Point::new(1.0, 5.0),
            Point::new(5.0, 8.0),
        );
        (frame, face)
    }
}
