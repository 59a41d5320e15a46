//! Insight3 molecule list binary format.
//!
//! ## File Structure
//!
//! ```text
//! +------------------+
//! | Header           |  16 bytes, opaque except:
//! |   molecules      |    u32 LE at offset 12
//! +------------------+
//! | Record 0         |  18 x 4-byte words (f32 / i32 LE)
//! +------------------+
//! | Record 1         |
//! +------------------+
//! | ...              |
//! +------------------+
//! | End marker       |  u32 0 (output lists)
//! +------------------+
//! ```

mod format;
mod record;
mod store;
mod stream;

pub use format::*;
pub use record::*;
pub use store::*;
pub use stream::*;
