//! Python bindings, built with the `python` feature.

use pyo3::{
    Bound,
    PyErr,
    PyResult,
    Python,
    exceptions::{PyIOError, PyIndexError, PyPermissionError, PyValueError},
    pyfunction,
    pymodule,
    types::{PyBytes, PyModule, PyModuleMethods},
    wrap_pyfunction,
};
use std::path::PathBuf;

use crate::error::SerError;
use crate::ser_file::{AccessMode, SerFile};

impl From<SerError> for PyErr {
    fn from(err: SerError) -> PyErr {
        match err {
            SerError::FileOpen { .. } | SerError::Io(_) | SerError::ReadFault(_)
            | SerError::WriteFault(_) | SerError::EndOfFile => PyIOError::new_err(err.to_string()),
            SerError::InvalidIndex(_) | SerError::InvalidKey(_)
            | SerError::InvalidFrameIndex { .. } => PyIndexError::new_err(err.to_string()),
            SerError::WriteOnReadOnly => PyPermissionError::new_err(err.to_string()),
            _ => PyValueError::new_err(err.to_string()),
        }
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> PyResult<String> {
    serde_json::to_string(value).map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Reads the header of a SER file.
///
/// Args:
///     path (str): Path to the .ser file.
///
/// Returns:
///     str: The decoded header as a JSON object.
///
/// Raises:
///     OSError: If the file cannot be opened or is shorter than a header.
///     ValueError: If the file name has no .ser extension.
#[pyfunction]
fn read_header(path: PathBuf) -> PyResult<String> {
    let mut ser = SerFile::open(&path, AccessMode::ReadOnly)?;
    let header = ser.read_header()?;
    to_json(&header)
}

/// Reads the raw bytes of one frame.
///
/// Args:
///     path (str): Path to the .ser file.
///     index (int): Zero-based frame index.
///
/// Returns:
///     bytes: The frame payload, `frame_byte_size` bytes long.
///
/// Raises:
///     IndexError: If `index` is not below the frame count.
///     OSError: If the payload is truncated or unreadable.
#[pyfunction]
fn read_frame<'py>(py: Python<'py>, path: PathBuf, index: usize) -> PyResult<Bound<'py, PyBytes>> {
    let mut ser = SerFile::open(&path, AccessMode::ReadOnly)?;
    let frame = ser.read_frame_vec(index)?;
    Ok(PyBytes::new(py, &frame))
}

/// Computes per-frame min/max/mean over all samples.
///
/// Returns:
///     str: A JSON array with one object per frame.
#[pyfunction]
fn frame_statistics(path: PathBuf) -> PyResult<String> {
    let stats = crate::processing::frame_statistics(&path)?;
    to_json(&stats)
}

#[pymodule]
#[pyo3(name = "serio")]
fn serio_module(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("__version__", crate::version())?;
    m.add_function(wrap_pyfunction!(read_header, m)?)?;
    m.add_function(wrap_pyfunction!(read_frame, m)?)?;
    m.add_function(wrap_pyfunction!(frame_statistics, m)?)?;
    Ok(())
}
