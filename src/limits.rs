//! Hard input limits. Anything past these is rejected as `InvalidRequest`
//! before it reaches the admission path.

pub const MAX_NAME_LEN: usize = 120;
pub const MAX_LOCATION_LEN: usize = 200;
pub const MAX_IMAGE_URL_LEN: usize = 2048;
pub const MAX_TURFS: usize = 10_000;
