//! Python FFI bindings via PyO3.
//!
//! Exposes the allocator with the same call shape the scheduler simulations
//! already use: plain lists in, an owner map plus the Phase 1 load snapshot
//! out, NaN standing in for "nobody scheduled".
//!
//! # Building the Python extension
//!
//! ```bash
//! pip install maturin
//! maturin develop --features python-ffi
//! ```
//!
//! # Usage
//!
//! ```python
//! import math
//! from rcg_core import rcg
//!
//! costmap = [[10.0, 1.0], [9.0, 2.0], [1.0, 10.0]]   # [subcarriers][users]
//! out_map, initial_map = rcg(costmap, [1.0, 2.0])
//! print(out_map)       # [0.0, 1.0, 1.0]
//! print(initial_map)   # [2, 1]
//!
//! out_map, initial_map = rcg(costmap, [math.nan, math.nan])
//! print(initial_map)   # nan
//! ```

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::error::AllocationError;
use crate::matrix::CostMatrix;
use crate::rcg::{Allocation, RateCravingGreedy};

fn to_py_err(e: AllocationError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

/// Rate craving greedy subcarrier allocation.
///
/// Args:
///     costmap: list of rows, one per subcarrier, one float per user (higher is better)
///     target_user_assignment: subcarriers each user must receive; all NaN = sleep slot
///
/// Returns:
///     (out_map, initial_map): owner per subcarrier as floats (NaN when sleeping),
///     and per-user load after the first pass (a plain NaN when sleeping)
///
/// Raises:
///     ValueError: on a shape mismatch, invalid or inconsistent targets
#[pyfunction]
pub fn rcg(
    py: Python<'_>,
    costmap: Vec<Vec<f32>>,
    target_user_assignment: Vec<f32>,
) -> PyResult<(Vec<f32>, PyObject)> {
    let costs = if costmap.is_empty() {
        // zero subcarriers still carry the user dimension through the target vector
        CostMatrix::new(0, target_user_assignment.len(), Vec::new())
    } else {
        CostMatrix::from_rows(costmap.as_slice())
    }
    .map_err(to_py_err)?;

    let allocation = RateCravingGreedy::default()
        .allocate(&costs, &target_user_assignment)
        .map_err(to_py_err)?;

    let initial_map = match &allocation {
        Allocation::Sleep { .. } => f32::NAN.into_py(py),
        Allocation::Assigned(a) => a.initial_load().to_vec().into_py(py),
    };
    Ok((allocation.owner_map(), initial_map))
}

// ── Module entry point ────────────────────────────────────────────────────────

/// RCG — Rate Craving Greedy subcarrier allocation for OFDMA schedulers.
#[pymodule]
pub fn rcg_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(rcg, m)?)?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    Ok(())
}
