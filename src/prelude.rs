//!
//! globally-available parts
//!
pub use crate::alphabet::{Alphabet, Symbol};
pub use crate::emission::Emissions;
pub use crate::error::{CTCError, Result};
pub use crate::gradient::compute_gradients;
pub use crate::output::{build_tables, sequence_probability, CTCOutput};
pub use crate::params::{CTCParams, ZeroEmissionPolicy};
