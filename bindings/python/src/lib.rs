use std::sync::Arc;

use blurscore_core::{BlurScoreConfig, SharpnessAnalyzer};
use pyo3::create_exception;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{PyBytes, PyDict, PyList};

create_exception!(
    blurscore,
    BlurScoreError,
    PyValueError,
    "Raised by every blurscore operation; args are (code, message)."
);

fn to_py_err(e: blurscore_core::BlurScoreError) -> PyErr {
    BlurScoreError::new_err((e.code(), e.to_string()))
}

/// Score the sharpness of an image (Laplacian variance).
///
/// Args:
///     input: Raw image bytes (JPEG, PNG, WebP, BMP or GIF)
///
/// Returns:
///     float, higher is sharper; 0.0 for a perfectly uniform image
///
/// Raises:
///     BlurScoreError: args[0] is "EMPTY_INPUT", "DECODE_ERROR" or "ZERO_DIMENSIONS"
#[pyfunction]
fn score_whole_image(py: Python<'_>, input: Vec<u8>) -> PyResult<f64> {
    py.allow_threads(move || blurscore_core::score_whole_image(&input))
        .map_err(to_py_err)
}

/// Face-aware sharpness analysis.
///
/// The SeetaFace model at `model_path` is loaded once, when the analyzer is
/// created; every method reuses it. One analyzer may be shared across threads.
///
/// Args:
///     model_path: Path to the SeetaFace model file
///     min_face_scale: Faces must be larger than this (default: 50)
///     thickness: Outline width in pixels for draw_face_rectangles (default: 1)
///
/// Raises:
///     BlurScoreError: args[0] is "MODEL_LOAD" or "CONFIG"
#[pyclass(frozen, module = "blurscore")]
struct Analyzer {
    inner: Arc<SharpnessAnalyzer>,
}

#[pymethods]
impl Analyzer {
    #[new]
    #[pyo3(signature = (model_path, *, min_face_scale=None, thickness=None))]
    fn new(model_path: &str, min_face_scale: Option<i32>, thickness: Option<u32>) -> PyResult<Self> {
        let mut config = BlurScoreConfig::default();
        config.detector.model_path = model_path.into();
        if let Some(scale) = min_face_scale {
            config.selection.min_face_scale = scale;
        }
        if let Some(t) = thickness {
            config.annotation.thickness = t;
        }
        let analyzer = SharpnessAnalyzer::from_config(&config).map_err(to_py_err)?;
        Ok(Self {
            inner: Arc::new(analyzer),
        })
    }

    /// Whole-image sharpness; the detector is not consulted.
    fn score_whole_image(&self, py: Python<'_>, input: Vec<u8>) -> PyResult<f64> {
        score_whole_image(py, input)
    }

    /// Score the sharpest usable face.
    ///
    /// Raises:
    ///     BlurScoreError: "NO_FACE_DETECTED" or "NO_QUALIFYING_FACE" when no
    ///     usable face is found, or a decode code
    fn score_face_region(&self, py: Python<'_>, input: Vec<u8>) -> PyResult<f64> {
        let inner = Arc::clone(&self.inner);
        py.allow_threads(move || inner.score_face_region(&input))
            .map_err(to_py_err)
    }

    /// Per-face sharpness for every usable face.
    ///
    /// Returns:
    ///     list of dicts with keys: row, col, scale, confidence, score
    fn analyze_faces(&self, py: Python<'_>, input: Vec<u8>) -> PyResult<Py<PyList>> {
        let inner = Arc::clone(&self.inner);
        let faces = py
            .allow_threads(move || inner.analyze_faces(&input))
            .map_err(to_py_err)?;

        let list = PyList::empty(py);
        for face in faces {
            let dict = PyDict::new(py);
            dict.set_item("row", face.region.detection.row)?;
            dict.set_item("col", face.region.detection.col)?;
            dict.set_item("scale", face.region.detection.scale)?;
            dict.set_item("confidence", face.region.detection.confidence)?;
            dict.set_item("score", face.score)?;
            list.append(dict)?;
        }
        Ok(list.into())
    }

    /// Crop the largest detected face.
    ///
    /// Returns:
    ///     PNG bytes of the face region
    fn crop_largest_face(&self, py: Python<'_>, input: Vec<u8>) -> PyResult<Py<PyBytes>> {
        let inner = Arc::clone(&self.inner);
        let png = py
            .allow_threads(move || inner.crop_largest_face(&input))
            .map_err(to_py_err)?;
        Ok(PyBytes::new(py, &png).into())
    }

    /// Outline every detected face.
    ///
    /// Returns:
    ///     PNG bytes of the annotated image
    fn draw_face_rectangles(&self, py: Python<'_>, input: Vec<u8>) -> PyResult<Py<PyBytes>> {
        let inner = Arc::clone(&self.inner);
        let png = py
            .allow_threads(move || inner.draw_face_rectangles(&input))
            .map_err(to_py_err)?;
        Ok(PyBytes::new(py, &png).into())
    }
}

#[pymodule]
fn blurscore(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("BlurScoreError", m.py().get_type::<BlurScoreError>())?;
    m.add_function(wrap_pyfunction!(score_whole_image, m)?)?;
    m.add_class::<Analyzer>()?;
    Ok(())
}
