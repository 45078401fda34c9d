//! NetCDF reader for X-band radar volumes.
//!
//! Files carry `latitude`/`longitude` (scalar or length-1), `range` (m),
//! `azimuth` (deg) and 2-D fields named by variable tag (`DBZH`, `DBZV`,
//! `VELH`, `VELV`) shaped `(azimuth, range)`. Packed fields are unpacked
//! with `scale_factor`/`add_offset`; `_FillValue` and `missing_value`
//! become NaN.

pub mod error;
pub mod native;

pub use error::{NetCdfError, NetCdfResult};
pub use native::{silence_hdf5_errors, NetCdfSource};
